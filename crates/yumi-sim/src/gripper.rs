//! 夹爪两段式命令暂存
//!
//! SG 夹爪命令采用「暂存/触发」协议模拟异步硬件接口：`set_sg_command`
//! 只把目标写入暂存区，夹爪在 `run_sg_routine` 触发之前不会移动。
//! 触发把整个暂存对（双侧）拷贝为生效目标，积分循环从下一个 tick 起
//! 驱动夹爪向生效目标收敛。
//!
//! 每侧的状态机逻辑独立：空闲 → 已暂存（stage 成功）→ 生效（trigger），
//! 可反复触发，没有终止状态。

use yumi_state::ArmTask;

/// 夹爪命令暂存区
///
/// 不变量：`active` 只在显式 trigger 时变化，单独 stage 永远不会改变它。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GripperCommandStage {
    /// 最近一次请求但尚未触发的目标行程（米）[右, 左]
    staged: [f64; 2],
    /// 积分循环当前驱动的目标行程（米）[右, 左]
    active: [f64; 2],
}

impl GripperCommandStage {
    /// 初始状态：双侧暂存与生效目标均为 0
    pub fn new() -> Self {
        Self::default()
    }

    /// 暂存一侧的目标行程（米）
    ///
    /// 只写暂存区；生效目标保持不变。
    pub fn stage(&mut self, side: ArmTask, target_m: f64) {
        self.staged[side.index()] = target_m;
    }

    /// 触发：把整个暂存对拷贝为生效目标
    ///
    /// 无条件成功，双侧同时生效（即使另一侧从未 stage 过）。
    pub fn trigger(&mut self) {
        self.active = self.staged;
    }

    /// 暂存目标 [右, 左]（米）
    #[inline]
    pub fn staged(&self) -> [f64; 2] {
        self.staged
    }

    /// 生效目标 [右, 左]（米）
    #[inline]
    pub fn active(&self) -> [f64; 2] {
        self.active
    }
}
