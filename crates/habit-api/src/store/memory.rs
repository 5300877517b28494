//! 内存用户存储
//!
//! 基于 DashMap 的高并发存储：主表按用户 id 分片，辅以邮箱唯一索引。
//! `update` 在持有条目写锁的情况下执行闭包，使"检查当日是否已打卡 +
//! 追加事件 + 发放经验值"对同一用户表现为单一原子单元；
//! 不同用户之间的读写互不阻塞。
//!
//! 锁顺序约定：先 emails 后 users，所有路径保持一致以避免死锁。

use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use habit_core::User;

use crate::error::{ApiError, Result};

/// 进程内用户存储
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    /// 用户聚合主表
    users: DashMap<Uuid, User>,
    /// 邮箱唯一索引（小写邮箱 → 用户 id）
    emails: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入新用户
    ///
    /// 通过邮箱索引的 entry 抢占保证唯一性，
    /// 并发注册同一邮箱只有一个会成功
    pub fn insert(&self, user: User) -> Result<()> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(ApiError::EmailTaken(user.email.clone())),
            Entry::Vacant(entry) => {
                entry.insert(user.id);
                self.users.insert(user.id, user);
                Ok(())
            }
        }
    }

    /// 按 id 读取用户聚合的快照
    ///
    /// 返回克隆，不持有锁
    pub fn find_by_id(&self, id: Uuid) -> Result<User> {
        self.users
            .get(&id)
            .map(|u| u.clone())
            .ok_or(ApiError::UserNotFound(id))
    }

    /// 按邮箱读取用户聚合的快照
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let id = *self.emails.get(email)?;
        self.users.get(&id).map(|u| u.clone())
    }

    /// 对单个用户聚合执行原子读-改-写
    ///
    /// 闭包在条目写锁内运行：返回 Ok 则修改生效，返回 Err 时
    /// 调用方必须保证未留下部分修改（引擎的事务在失败分支不改聚合）。
    /// 闭包内不得修改邮箱，邮箱变更走 [`Self::update_profile`]。
    pub fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut User) -> Result<R>) -> Result<R> {
        let mut entry = self.users.get_mut(&id).ok_or(ApiError::UserNotFound(id))?;
        f(entry.value_mut())
    }

    /// 更新用户资料（姓名/邮箱），维护邮箱唯一索引
    ///
    /// 换邮箱时先抢占新邮箱，再更新聚合，最后释放旧邮箱；
    /// 任何一步失败都会回滚抢占，索引不会出现悬挂条目。
    pub fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User> {
        // 只在邮箱真正变化时走抢占流程
        let mut claimed_email: Option<String> = None;
        if let Some(new_email) = &email {
            match self.emails.entry(new_email.clone()) {
                Entry::Occupied(entry) => {
                    // 已指向自己说明邮箱未变，指向他人则冲突
                    if *entry.get() != id {
                        return Err(ApiError::EmailTaken(new_email.clone()));
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(id);
                    claimed_email = Some(new_email.clone());
                }
            }
        }

        let snapshot = {
            let mut entry = match self.users.get_mut(&id) {
                Some(entry) => entry,
                None => {
                    if let Some(claimed) = &claimed_email {
                        self.emails.remove_if(claimed, |_, v| *v == id);
                    }
                    return Err(ApiError::UserNotFound(id));
                }
            };

            let user = entry.value_mut();
            let old_email = user.email.clone();
            if let Some(name) = name {
                user.name = name;
            }
            if let Some(new_email) = email {
                user.email = new_email;
            }
            let snapshot = user.clone();
            drop(entry);

            // 换过邮箱才需要释放旧索引
            if claimed_email.is_some() && old_email != snapshot.email {
                self.emails.remove_if(&old_email, |_, v| *v == id);
            }
            snapshot
        };

        Ok(snapshot)
    }

    /// 用户总数
    pub fn count(&self) -> usize {
        self.users.len()
    }
}
