// src/combat/src/combatant.rs

/// 拥有生命值的战斗单位
///
/// 玩家和敌人各自实现，`hp()` 始终在 `[0, max_hp()]` 范围内
pub trait HasHealth {
    fn name(&self) -> &str;

    fn hp(&self) -> u32;

    fn max_hp(&self) -> u32;

    fn is_dead(&self) -> bool {
        self.hp() == 0
    }

    fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// 受到伤害，实现方在此处理减伤。返回实际损失的生命
    fn take_damage(&mut self, amount: u32) -> u32 {
        self.lose_health(amount)
    }

    /// 无视减伤的生命损失
    fn lose_health(&mut self, amount: u32) -> u32;

    /// 返回实际恢复的生命
    fn heal(&mut self, amount: u32) -> u32;
}

/// 扣除生命，最低为0
pub fn drain(hp: &mut u32, amount: u32) -> u32 {
    let lost = amount.min(*hp);
    *hp -= lost;
    lost
}

/// 恢复生命，不超过上限
pub fn restore(hp: &mut u32, max_hp: u32, amount: u32) -> u32 {
    let restored = amount.min(max_hp.saturating_sub(*hp));
    *hp += restored;
    restored
}
