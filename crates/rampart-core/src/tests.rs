#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::config::LevelDefinition;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::WaveEvent;
    use crate::types::{Modifiers, ObjectId, Path, PlayArea};

    const LEVEL_JSON: &str = r#"{
        "paths": [[[0.0, 0.0], [10.0, 0.0], [10.0, 5.0]]],
        "enemies": [
            { "kind": "soldier", "health": 100.0, "speed": 1.5, "reward": 10 },
            { "kind": "blob", "health": 300.0, "speed": 0.8, "reward": 25 }
        ],
        "waves": [
            { "enemies": [{ "kind": "soldier" }, { "kind": "blob", "delay": 1.5 }] },
            {
                "enemies": [{ "kind": "soldier", "path": 0, "delay": 0.5 }],
                "waveReward": 40,
                "healthMultiplier": 1.5,
                "rewardMultiplier": 2.0
            }
        ]
    }"#;

    // ---- Level definitions ----

    #[test]
    fn test_level_definition_parses_with_defaults() {
        let level = LevelDefinition::from_json_str(LEVEL_JSON).unwrap();

        assert_eq!(level.paths.len(), 1);
        assert_eq!(level.enemies.len(), 2);
        assert_eq!(level.waves.len(), 2);
        assert_eq!(level.settings.lives, 20);

        let first = &level.waves[0];
        assert_eq!(first.wave_reward, 0);
        assert_eq!(first.health_multiplier, 1.0);
        assert_eq!(first.reward_multiplier, 1.0);
        assert_eq!(first.enemies[0].path, 0);
        assert_eq!(first.enemies[0].delay, 0.0);
        assert_eq!(first.enemies[1].delay, 1.5);

        let second = &level.waves[1];
        assert_eq!(second.wave_reward, 40);
        assert_eq!(
            second.modifiers(),
            Modifiers {
                speed: 1.0,
                health: 1.5,
                reward: 2.0
            }
        );
    }

    #[test]
    fn test_enemy_config_lookup() {
        let level = LevelDefinition::from_json_str(LEVEL_JSON).unwrap();
        assert_eq!(level.enemy_config("blob").unwrap().reward, 25);
        assert!(level.enemy_config("dragon").is_none());
    }

    #[test]
    fn test_short_path_rejected_at_parse() {
        let json = r#"{ "paths": [[[0.0, 0.0]]], "enemies": [], "waves": [] }"#;
        let err = LevelDefinition::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)), "got {err}");
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = LevelDefinition::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_level_definition_survives_json_round_trip() {
        let level = LevelDefinition::from_json_str(LEVEL_JSON).unwrap();
        let json = serde_json::to_string(&level).unwrap();
        assert!(json.contains(r#""paths":[[[0.0,0.0],[10.0,0.0],[10.0,5.0]]]"#), "{json}");

        let back = LevelDefinition::from_json_str(&json).unwrap();
        assert_eq!(back, level);
    }

    #[test]
    fn test_enemy_config_validation() {
        let level = LevelDefinition::from_json_str(LEVEL_JSON).unwrap();
        let mut config = level.enemy_config("soldier").unwrap().clone();
        assert!(config.validate().is_ok());

        config.speed = 0.0;
        assert!(config.validate().is_ok());

        for health in [-5.0, 0.0, f32::NAN] {
            config.health = health;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidEnemyConfig { .. })
            ));
        }

        config.health = 100.0;
        config.speed = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEnemyConfig { .. })
        ));
    }

    #[test]
    fn test_wave_definition_validation() {
        let level = LevelDefinition::from_json_str(LEVEL_JSON).unwrap();
        let wave = &level.waves[1];
        assert!(wave.validate(1).is_ok());

        let mut zero_health = wave.clone();
        zero_health.health_multiplier = 0.0;
        assert!(matches!(
            zero_health.validate(1),
            Err(ConfigError::InvalidWave { wave: 1, .. })
        ));

        let mut infinite_reward = wave.clone();
        infinite_reward.reward_multiplier = f32::INFINITY;
        assert!(infinite_reward.validate(1).is_err());

        let mut negative_delay = wave.clone();
        negative_delay.enemies[0].delay = -0.5;
        assert!(negative_delay.validate(1).is_err());
    }

    // ---- Paths ----

    #[test]
    fn test_path_requires_two_waypoints() {
        assert!(matches!(
            Path::new(vec![Vec2::ZERO]),
            Err(ConfigError::InvalidPath { waypoints: 1 })
        ));
        let path = Path::new(vec![Vec2::ZERO, Vec2::X]).unwrap();
        assert!(!path.is_empty());
    }

    #[test]
    fn test_path_lengths() {
        let path = Path::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(3.0, 10.0),
        ])
        .unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.segment_length(1), 5.0);
        assert_eq!(path.segment_length(2), 6.0);
        assert_eq!(path.length(), 11.0);
        assert_eq!(path.first(), Vec2::ZERO);
        assert_eq!(path.last(), Vec2::new(3.0, 10.0));
        assert_eq!(path[1], Vec2::new(3.0, 4.0));
        assert_eq!(path.get(3), None);
    }

    // ---- Geometry ----

    #[test]
    fn test_play_area_contains_bounds() {
        let area = PlayArea::new(Vec2::ZERO, Vec2::new(10.0, 5.0));
        assert!(area.contains(Vec2::new(0.0, 0.0)));
        assert!(area.contains(Vec2::new(10.0, 5.0)));
        assert!(!area.contains(Vec2::new(10.1, 2.0)));
        assert!(!area.contains(Vec2::new(3.0, -0.1)));
    }

    #[test]
    fn test_modifiers_compose_multiplicatively() {
        let a = Modifiers {
            speed: 0.5,
            health: 2.0,
            reward: 1.5,
        };
        let b = Modifiers {
            speed: 0.5,
            health: 1.5,
            reward: 2.0,
        };
        let c = a.compose(b);
        assert_eq!(c.speed, 0.25);
        assert_eq!(c.health, 3.0);
        assert_eq!(c.reward, 3.0);
        assert_eq!(Modifiers::default().compose(a), a);
    }

    // ---- Events ----

    #[test]
    fn test_wave_event_serde() {
        let events = vec![
            WaveEvent::Started { wave: 0 },
            WaveEvent::AllEnemiesAdded { wave: 0 },
            WaveEvent::EnemyRemoved {
                wave: 0,
                enemy: ObjectId(7),
                cause: RemovalCause::Killed {
                    by: Some(ObjectId(3)),
                },
            },
            WaveEvent::EnemyRemoved {
                wave: 0,
                enemy: ObjectId(8),
                cause: RemovalCause::ReachedEnd,
            },
            WaveEvent::Done { wave: 0, reward: 40 },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: WaveEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_layers_are_ordered_bottom_to_top() {
        assert!(Layer::Background < Layer::Enemy);
        assert!(Layer::Shot < Layer::EnemyHealthBar);
    }
}
