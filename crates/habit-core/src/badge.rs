//! 成就徽章评估
//!
//! 固定的递增门槛表把最长 streak 映射为已达成的徽章档位，
//! 并给出下一个待达成档位的进度。

use serde::{Deserialize, Serialize};

/// 徽章档位
///
/// 每个档位对应一个固定的连续打卡天数门槛
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeTier {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl BadgeTier {
    /// 全部档位，按门槛升序
    pub const ALL: [BadgeTier; 4] = [
        BadgeTier::Bronze,
        BadgeTier::Silver,
        BadgeTier::Gold,
        BadgeTier::Diamond,
    ];

    /// 达成该档位所需的连续打卡天数
    pub const fn threshold(self) -> u32 {
        match self {
            BadgeTier::Bronze => 7,
            BadgeTier::Silver => 30,
            BadgeTier::Gold => 100,
            BadgeTier::Diamond => 365,
        }
    }
}

/// 单个徽章的达成状态
///
/// 已达成的条目不携带进度；待达成条目携带 `progress`/`target`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub tier: BadgeTier,
    pub threshold: u32,
    pub achieved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
}

/// 徽章评估器
pub struct BadgeEvaluator;

impl BadgeEvaluator {
    /// 根据最长 streak 评估徽章列表
    ///
    /// 输出按门槛升序：所有已达成档位，随后至多一个待达成档位。
    /// `max_streak >= 365` 时没有待达成条目。
    pub fn badges_for(max_streak: u32) -> Vec<BadgeStatus> {
        let mut badges = Vec::with_capacity(BadgeTier::ALL.len());

        for tier in BadgeTier::ALL {
            let threshold = tier.threshold();
            if threshold <= max_streak {
                badges.push(BadgeStatus {
                    tier,
                    threshold,
                    achieved: true,
                    progress: None,
                    target: None,
                });
            } else {
                // 第一个未达成的档位即为待达成徽章，更高档位不展示
                badges.push(BadgeStatus {
                    tier,
                    threshold,
                    achieved: false,
                    progress: Some(max_streak),
                    target: Some(threshold),
                });
                break;
            }
        }

        badges
    }

    /// 已达成的徽章数量
    pub fn achieved_count(max_streak: u32) -> usize {
        BadgeTier::ALL
            .iter()
            .filter(|t| t.threshold() <= max_streak)
            .count()
    }
}
