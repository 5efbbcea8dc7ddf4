// Host-side tests for configuration validation.

use keyfall_core::{ConfigError, LayoutConfig, MotionConfig, VisualizerConfig};

fn with_layout(layout: LayoutConfig) -> VisualizerConfig {
    VisualizerConfig {
        layout,
        ..VisualizerConfig::default()
    }
}

fn with_motion(motion: MotionConfig) -> VisualizerConfig {
    VisualizerConfig {
        motion,
        ..VisualizerConfig::default()
    }
}

#[test]
fn black_key_ratio_is_bounded_by_one() {
    let ok = with_layout(LayoutConfig {
        black_key_width_ratio: 1.0,
        ..LayoutConfig::default()
    });
    assert!(ok.validate().is_ok());

    let wide = with_layout(LayoutConfig {
        black_key_width_ratio: 1.2,
        ..LayoutConfig::default()
    });
    assert!(matches!(
        wide.validate(),
        Err(ConfigError::TooLarge {
            field: "layout.black_key_width_ratio",
            ..
        })
    ));
}

#[test]
fn motion_offsets_must_be_finite() {
    let nan_hit = with_motion(MotionConfig {
        hit_line_height: f32::NAN,
        ..MotionConfig::default()
    });
    assert!(matches!(
        nan_hit.validate(),
        Err(ConfigError::NotFinite {
            field: "motion.hit_line_height",
            ..
        })
    ));

    let inf_lift = with_motion(MotionConfig {
        black_key_lift: f32::INFINITY,
        ..MotionConfig::default()
    });
    assert!(matches!(
        inf_lift.validate(),
        Err(ConfigError::NotFinite {
            field: "motion.black_key_lift",
            ..
        })
    ));

    // negative offsets are fine, only non-finite ones are rejected
    let below = with_motion(MotionConfig {
        hit_line_height: -2.0,
        ..MotionConfig::default()
    });
    assert!(below.validate().is_ok());
}

#[test]
fn seek_settings_must_be_positive() {
    let config = VisualizerConfig {
        seek_jump_secs: 0.0,
        ..VisualizerConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotPositive {
            field: "seek_jump_secs",
            ..
        })
    ));
    let config = VisualizerConfig {
        max_playback_rate: -1.0,
        ..VisualizerConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn playback_step_grows_with_frame_time() {
    let config = VisualizerConfig::default();
    assert!((config.max_playback_step(0.0) - config.seek_jump_secs).abs() < 1e-12);
    let slow = config.max_playback_step(0.6);
    assert!(slow > 0.6, "a 0.6s frame at 1x must fit");
    assert!((slow - (0.6f32 as f64 * config.max_playback_rate + config.seek_jump_secs)).abs() < 1e-9);
    // NaN or negative frame deltas fall back to the bare slack
    assert_eq!(config.max_playback_step(-1.0), config.seek_jump_secs);
    assert_eq!(config.max_playback_step(f32::NAN), config.seek_jump_secs);
}
