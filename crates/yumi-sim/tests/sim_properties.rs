//! 仿真器属性测试
//!
//! 用随机速度向量和随机 tick 数验证限位不变量，以及 SG 命令的
//! 值域映射。确定性的行为测试见 `simulator.rs` 内的单元测试。

use proptest::prelude::*;
use std::sync::Arc;
use yumi_sim::{SimConfig, SimRunner, Simulator};
use yumi_state::JointLimits;

fn simulator() -> Simulator {
    Simulator::new(&SimConfig::default()).unwrap()
}

proptest! {
    /// 任意速度、任意 tick 数，位姿向量永远在限位内
    #[test]
    fn pose_always_within_limits(
        vel in proptest::array::uniform14(-1.0e4f64..1.0e4),
        ticks in 1usize..300,
    ) {
        let sim = simulator();
        let limits = JointLimits::yumi();

        sim.ingest_velocity(&vel).unwrap();
        for _ in 0..ticks {
            let (pose, _) = sim.tick();
            prop_assert!(limits.contains(&pose));
        }
    }

    /// MoveTo 暂存值始终是毫米目标的千分之一
    #[test]
    fn move_to_stages_metric_target(target_mm in -100.0f64..100.0) {
        let sim = simulator();
        sim.stage_gripper_command("T_ROB_R", 5, target_mm).unwrap();
        let staged = sim.gripper_stage().staged();
        prop_assert!((staged[0] - target_mm / 1000.0).abs() < 1e-12);
        prop_assert_eq!(staged[1], 0.0);
    }

    /// GripIn/GripOut 无视请求里的目标值
    #[test]
    fn grip_commands_ignore_target(target_mm in -100.0f64..100.0) {
        let sim = simulator();
        sim.stage_gripper_command("T_ROB_L", 6, target_mm).unwrap();
        prop_assert_eq!(sim.gripper_stage().staged()[1], 0.0);

        sim.stage_gripper_command("T_ROB_L", 7, target_mm).unwrap();
        prop_assert_eq!(sim.gripper_stage().staged()[1], 0.025);
    }

    /// 未知命令码一律拒绝且无副作用
    #[test]
    fn unknown_codes_are_rejected(code in 0u8..255) {
        prop_assume!(!(5..=7).contains(&code));
        let sim = simulator();
        prop_assert!(sim.stage_gripper_command("T_ROB_R", code, 1.0).is_err());
        prop_assert_eq!(sim.gripper_stage().staged(), [0.0, 0.0]);
    }
}

/// 驱动线程 + 异步注入 + 同步夹爪服务并发运行，报文序号连续且位姿合法
#[test]
fn runner_with_concurrent_clients() {
    let config = SimConfig {
        update_rate_hz: 1000.0,
        channel_capacity: 4096,
        max_ticks: Some(200),
    };
    let sim = Arc::new(Simulator::new(&config).unwrap());
    let runner = SimRunner::spawn(sim.clone(), config).unwrap();
    let reports = runner.state_reports();
    let limits = JointLimits::yumi();

    let ingest = {
        let sim = sim.clone();
        std::thread::spawn(move || {
            for i in 0..500 {
                let v = if i % 2 == 0 { 2.0 } else { -2.0 };
                sim.ingest_velocity(&[v; 14]).unwrap();
            }
        })
    };
    let gripper = {
        let sim = sim.clone();
        std::thread::spawn(move || {
            for _ in 0..100 {
                sim.stage_gripper_command("T_ROB_R", 7, 0.0).unwrap();
                sim.trigger_gripper_routine();
            }
        })
    };

    let mut expected = 1;
    while let Ok(report) = reports.recv_timeout(std::time::Duration::from_secs(5)) {
        assert_eq!(report.seq, expected);
        assert!(limits.contains(&report.position));
        expected += 1;
        if expected > 200 {
            break;
        }
    }
    assert_eq!(expected, 201);

    ingest.join().unwrap();
    gripper.join().unwrap();
}
