//! Fixed catalogs: redeemable rewards, one-time earn actions, spin prizes.

use rewa_types::Amount;

/// A redeemable reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u64,
}

impl Reward {
    pub fn cost_amount(&self) -> Amount {
        Amount::new(self.cost)
    }
}

/// The reward gallery, in display order.
pub const REWARDS: &[Reward] = &[
    Reward { id: "r1", name: "10% Off", cost: 200 },
    Reward { id: "r2", name: "Free Shipping", cost: 300 },
    Reward { id: "r3", name: "$5 Credit", cost: 500 },
    Reward { id: "r4", name: "NFT Badge", cost: 1000 },
];

pub fn find_reward(id: &str) -> Option<&'static Reward> {
    REWARDS.iter().find(|r| r.id == id)
}

/// An earning action claimable at most once per account lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarnAction {
    pub id: &'static str,
    pub name: &'static str,
    pub reward: u64,
}

impl EarnAction {
    pub fn reward_amount(&self) -> Amount {
        Amount::new(self.reward)
    }
}

/// One-time earn actions.
pub const EARN_ACTIONS: &[EarnAction] = &[
    EarnAction { id: "connect_wallet", name: "Connect Wallet", reward: 500 },
    EarnAction { id: "referral", name: "Refer a Friend", reward: 200 },
];

pub fn find_action(id: &str) -> Option<&'static EarnAction> {
    EARN_ACTIONS.iter().find(|a| a.id == id)
}

/// Lucky-spin prize table; one prize is drawn uniformly.
pub const SPIN_PRIZES: &[u64] = &[25, 50, 100, 200, 500];
