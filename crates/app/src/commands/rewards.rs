//! Rewards economy commands

use healthprod_domain::Result;

use crate::context::AppContext;

pub fn list(ctx: &AppContext) -> String {
    let state = ctx.state.read();
    let mut out = format!("Coins: {}", state.coins());
    for reward in state.rewards() {
        out.push_str(&format!(
            "\n  {:<3} {:<26} {:>4} coins  {}",
            reward.id,
            reward.name,
            reward.cost,
            if reward.unlocked { "unlocked" } else { "locked" }
        ));
    }
    out
}

pub fn unlock(ctx: &AppContext, id: &str) -> Result<String> {
    let mut state = ctx.state.write();
    let name = state.unlock_reward(id)?.name.clone();
    Ok(format!("Unlocked {name}! {} coins left.", state.coins()))
}

pub fn challenges(ctx: &AppContext) -> String {
    let state = ctx.state.read();
    let mut out = String::new();
    for challenge in state.challenges() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!(
            "{} ({} days)\n  {}",
            challenge.title, challenge.duration_days, challenge.description
        ));
        for (rank, entry) in challenge.leaderboard.iter().enumerate() {
            out.push_str(&format!(
                "\n  {}. {:<6} {}/{} ({:.0}%)",
                rank + 1,
                entry.name,
                entry.progress,
                challenge.duration_days,
                entry.completion_ratio(challenge.duration_days) * 100.0
            ));
        }
    }
    if out.is_empty() {
        out.push_str("No active challenges.");
    }
    out
}
