//! 固定频率驱动线程
//!
//! 一个后台线程以配置的频率驱动 [`Simulator::tick`]，每个周期在锁外
//! 发布两条报文：关节状态报文（序号从 1 起单调递增）和 EGM 通道健康
//! 报文。发布采用「最新优先」策略——通道满时丢弃最旧一条再写入，
//! 慢消费者永远不会阻塞 tick 线程。
//!
//! 生命周期与教科书式的 IO 线程一致：`Arc<AtomicBool>` 运行标志
//! （Release/Acquire 配对），`stop()` 幂等，Drop 时自动停止并 join。

use crate::config::SimConfig;
use crate::error::SimError;
use crate::simulator::Simulator;
use arc_swap::ArcSwapOption;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use spin_sleep::SpinSleeper;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, trace};
use yumi_state::{EgmStateReport, JointStateReport};

/// 固定频率仿真驱动
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use yumi_sim::{SimConfig, SimRunner, Simulator};
///
/// let config = SimConfig {
///     max_ticks: Some(10),
///     channel_capacity: 16,
///     ..SimConfig::default()
/// };
/// let sim = Arc::new(Simulator::new(&config).unwrap());
/// let runner = SimRunner::spawn(sim, config).unwrap();
///
/// let reports = runner.state_reports();
/// let first = reports.recv().unwrap();
/// assert_eq!(first.seq, 1);
/// ```
pub struct SimRunner {
    is_running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    state_rx: Receiver<JointStateReport>,
    egm_rx: Receiver<EgmStateReport>,
    latest: Arc<ArcSwapOption<JointStateReport>>,
}

impl SimRunner {
    /// 启动驱动线程
    ///
    /// # Errors
    ///
    /// 配置无效返回 [`SimError::Config`]；线程创建失败返回
    /// [`SimError::Thread`]。
    pub fn spawn(sim: Arc<Simulator>, config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let (state_tx, state_rx) = bounded(config.channel_capacity);
        let (egm_tx, egm_rx) = bounded(config.channel_capacity);
        let is_running = Arc::new(AtomicBool::new(true));
        let latest: Arc<ArcSwapOption<JointStateReport>> = Arc::new(ArcSwapOption::const_empty());

        let thread = {
            let is_running = is_running.clone();
            let latest = latest.clone();
            // tick 线程自持一份接收端，用于通道满时丢弃最旧报文
            let state_keep = state_rx.clone();
            let egm_keep = egm_rx.clone();
            std::thread::Builder::new()
                .name("yumi-sim-tick".to_string())
                .spawn(move || {
                    tick_loop(
                        sim, config, state_tx, state_keep, egm_tx, egm_keep, latest, is_running,
                    );
                })
                .map_err(|e| SimError::Thread(e.to_string()))?
        };

        Ok(Self {
            is_running,
            thread: Some(thread),
            state_rx,
            egm_rx,
            latest,
        })
    }

    /// 关节状态报文接收端（可多次克隆）
    pub fn state_reports(&self) -> Receiver<JointStateReport> {
        self.state_rx.clone()
    }

    /// EGM 通道健康报文接收端
    pub fn egm_reports(&self) -> Receiver<EgmStateReport> {
        self.egm_rx.clone()
    }

    /// 最近一次发布的关节状态报文（轮询式读取，永不阻塞）
    pub fn latest_state(&self) -> Option<Arc<JointStateReport>> {
        self.latest.load_full()
    }

    /// 驱动线程是否仍在运行
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Acquire)
    }

    /// 请求停止（幂等，立即返回；线程在当前周期末退出）
    pub fn stop(&self) {
        // Release: 停止前的所有写入对看到 false 的线程可见
        self.is_running.store(false, Ordering::Release);
    }

    /// 停止并等待驱动线程退出
    pub fn join(mut self) {
        self.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SimRunner {
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// tick 线程主循环
#[allow(clippy::too_many_arguments)]
fn tick_loop(
    sim: Arc<Simulator>,
    config: SimConfig,
    state_tx: Sender<JointStateReport>,
    state_keep: Receiver<JointStateReport>,
    egm_tx: Sender<EgmStateReport>,
    egm_keep: Receiver<EgmStateReport>,
    latest: Arc<ArcSwapOption<JointStateReport>>,
    is_running: Arc<AtomicBool>,
) {
    let period = config.period();
    let sleeper = SpinSleeper::default();
    let mut seq: u64 = 0;

    info!(
        "Tick loop started: {} Hz (period {:?})",
        config.update_rate_hz, period
    );

    loop {
        // Acquire: 看到 false 时必须看到停止方此前的全部写入
        if !is_running.load(Ordering::Acquire) {
            trace!("Tick loop: is_running flag is false, exiting");
            break;
        }
        if let Some(max) = config.max_ticks
            && seq >= max
        {
            trace!("Tick loop: reached max_ticks={}, exiting", max);
            break;
        }

        // 1. 积分（锁内）
        let (pose, rate) = sim.tick();

        // 2. 组包并发布（锁外）
        seq += 1;
        let report = JointStateReport::new(seq, unix_timestamp_us(), pose, rate);
        latest.store(Some(Arc::new(report.clone())));
        publish_latest(&state_tx, &state_keep, report);
        publish_latest(&egm_tx, &egm_keep, EgmStateReport::all_active());

        // 3. 休眠到下一个周期
        sleeper.sleep(period);
    }

    is_running.store(false, Ordering::Release);
    info!("Tick loop exited after {} ticks", seq);
}

/// 最新优先发布：通道满时丢弃最旧一条再写入
fn publish_latest<T>(tx: &Sender<T>, keep: &Receiver<T>, report: T) {
    match tx.try_send(report) {
        Ok(()) => {},
        Err(TrySendError::Full(report)) => {
            let _ = keep.try_recv();
            if tx.try_send(report).is_err() {
                trace!("Report dropped (channel contended)");
            }
        },
        Err(TrySendError::Disconnected(_)) => {
            // 没有消费者不是错误，仿真继续推进
            trace!("Report dropped (no subscribers)");
        },
    }
}

/// UNIX 时间戳（微秒）
fn unix_timestamp_us() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_micros() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner_config(max_ticks: u64) -> SimConfig {
        SimConfig {
            update_rate_hz: 1000.0,
            channel_capacity: 4096,
            max_ticks: Some(max_ticks),
        }
    }

    #[test]
    fn test_sequence_numbers_are_monotonic_without_gaps() {
        let config = runner_config(50);
        let sim = Arc::new(Simulator::new(&config).unwrap());
        let runner = SimRunner::spawn(sim, config).unwrap();
        let reports = runner.state_reports();

        let mut expected = 1;
        while let Ok(report) = reports.recv_timeout(std::time::Duration::from_secs(2)) {
            assert_eq!(report.seq, expected);
            expected += 1;
            if expected > 50 {
                break;
            }
        }
        assert_eq!(expected, 51);
    }

    #[test]
    fn test_egm_reports_published_each_tick() {
        let config = runner_config(10);
        let sim = Arc::new(Simulator::new(&config).unwrap());
        let runner = SimRunner::spawn(sim, config).unwrap();
        let egm = runner.egm_reports();

        let report = egm.recv_timeout(std::time::Duration::from_secs(2)).unwrap();
        assert!(report.channels.iter().all(|c| c.active));
    }

    #[test]
    fn test_stop_terminates_loop() {
        let config = SimConfig {
            update_rate_hz: 1000.0,
            channel_capacity: 1,
            max_ticks: None,
        };
        let sim = Arc::new(Simulator::new(&config).unwrap());
        let runner = SimRunner::spawn(sim, config).unwrap();
        assert!(runner.is_running());

        runner.stop();
        // join 在 Drop 中完成；这里只验证标志翻转
        assert!(!runner.is_running());
    }

    #[test]
    fn test_latest_wins_on_full_channel() {
        // 深度 1 的通道：不消费也不会阻塞 tick 线程
        let config = SimConfig {
            update_rate_hz: 2000.0,
            channel_capacity: 1,
            max_ticks: Some(100),
        };
        let sim = Arc::new(Simulator::new(&config).unwrap());
        let runner = SimRunner::spawn(sim, config).unwrap();

        // 等待循环跑完
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
        while runner.is_running() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(!runner.is_running());

        // 快照单元里保存的是最后一条报文
        let latest = runner.latest_state().unwrap();
        assert_eq!(latest.seq, 100);
    }

    #[test]
    fn test_timestamps_are_nonzero_and_ordered() {
        let config = runner_config(5);
        let sim = Arc::new(Simulator::new(&config).unwrap());
        let runner = SimRunner::spawn(sim, config).unwrap();
        let reports = runner.state_reports();

        let mut last_ts = 0;
        for _ in 0..5 {
            let report = reports.recv_timeout(std::time::Duration::from_secs(2)).unwrap();
            assert!(report.timestamp_us >= last_ts);
            assert!(report.timestamp_us > 0);
            last_ts = report.timestamp_us;
        }
    }
}
