//! Tunable gameplay constants.
//!
//! Everything has a compiled-in default. A RON file may override any subset:
//!
//! ```ron
//! (
//!     caster: (speed: 300.0, fire_period: 0.15),
//!     spawner: (period: 3.0, seed: Some(7)),
//! )
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

/// Environment variable that overrides where the binary looks for tunables.
pub const TUNABLES_ENV: &str = "ARENA_TUNABLES";
pub const DEFAULT_TUNABLES_PATH: &str = "assets/tunables.ron";

#[derive(Debug, thiserror::Error)]
pub enum TunablesError {
    #[error("failed to read tunables: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub caster: CasterTunables,
    pub projectile: ProjectileTunables,
    pub camera: CameraTunables,
    pub spawner: SpawnerTunables,
    pub hud: HudTunables,
    pub bestiary: Vec<EnemyArchetype>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            caster: CasterTunables::default(),
            projectile: ProjectileTunables::default(),
            camera: CameraTunables::default(),
            spawner: SpawnerTunables::default(),
            hud: HudTunables::default(),
            bestiary: EnemyArchetype::default_roster(),
        }
    }
}

impl Tunables {
    pub fn from_ron(text: &str) -> Result<Self, TunablesError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TunablesError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Load from `path`, falling back to defaults.
    ///
    /// A missing file is normal (no overrides); a broken one is worth a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(t) => {
                info!("loaded tunables from {}", path.display());
                t
            }
            Err(TunablesError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no tunables at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{e} ({}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Path from `ARENA_TUNABLES`, or the default asset path.
    pub fn configured_path() -> std::path::PathBuf {
        std::env::var_os(TUNABLES_ENV)
            .map(Into::into)
            .unwrap_or_else(|| DEFAULT_TUNABLES_PATH.into())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CasterTunables {
    pub speed: f32,
    pub bullet_speed: f32,
    /// Seconds between shots.
    pub fire_period: f32,
    /// Seconds of damage immunity after a hit.
    pub immune_time: f32,
    pub max_health: i32,
    /// Muzzle distance in front of the caster.
    pub muzzle_offset: f32,
    pub radius: f32,
}

impl Default for CasterTunables {
    fn default() -> Self {
        Self {
            speed: 260.0,
            bullet_speed: 900.0,
            fire_period: 0.25,
            immune_time: 1.0,
            max_health: 100,
            muzzle_offset: 22.0,
            radius: 13.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectileTunables {
    /// Seconds before an unresolved projectile fizzles out.
    pub lifetime: f32,
    pub radius: f32,
}

impl Default for ProjectileTunables {
    fn default() -> Self {
        Self { lifetime: 4.0, radius: 4.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraTunables {
    /// Camera z above the followed target. In 2D this is draw depth rather than height.
    pub altitude: f32,
    /// Shift along y so the caster sits off-centre.
    pub depth_offset: f32,
    pub smooth_time: f32,
}

impl Default for CameraTunables {
    fn default() -> Self {
        Self { altitude: 500.0, depth_offset: -60.0, smooth_time: 0.3 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpawnerTunables {
    pub period: f32,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    pub points: Vec<(f32, f32)>,
}

impl Default for SpawnerTunables {
    fn default() -> Self {
        Self {
            period: 5.0,
            seed: None,
            points: vec![(-900.0, 480.0), (900.0, 480.0), (-900.0, -480.0), (900.0, -480.0)],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HudTunables {
    pub overlay_max_alpha: f32,
    /// Lerp factor per second towards zero.
    pub overlay_fade_speed: f32,
}

impl Default for HudTunables {
    fn default() -> Self {
        Self { overlay_max_alpha: 0.45, overlay_fade_speed: 5.0 }
    }
}

/// An enemy "prefab": everything needed to spawn one kind of monster.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnemyArchetype {
    pub name: String,
    pub health: i32,
    /// Damage dealt to the caster on contact.
    pub strength: i32,
    pub score: u32,
    /// Uniform scale applied to the base enemy size.
    pub scale: f32,
    pub speed: f32,
    pub rgb: [f32; 3],
}

impl EnemyArchetype {
    /// Collider radius before scaling.
    pub const BASE_RADIUS: f32 = 16.0;

    #[inline]
    pub fn color(&self) -> Color {
        Color::srgb(self.rgb[0], self.rgb[1], self.rgb[2])
    }

    pub fn default_roster() -> Vec<Self> {
        vec![
            Self {
                name: "Imp".into(),
                health: 3,
                strength: 5,
                score: 50,
                scale: 0.8,
                speed: 150.0,
                rgb: [0.95, 0.45, 0.2],
            },
            Self {
                name: "Ogre".into(),
                health: 5,
                strength: 10,
                score: 100,
                scale: 1.0,
                speed: 110.0,
                rgb: [0.9, 0.25, 0.25],
            },
            Self {
                name: "Brute".into(),
                health: 8,
                strength: 20,
                score: 250,
                scale: 1.5,
                speed: 70.0,
                rgb: [0.6, 0.15, 0.45],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let t = Tunables::from_ron("(caster: (speed: 300.0), spawner: (seed: Some(7)))").unwrap();
        assert_eq!(t.caster.speed, 300.0);
        assert_eq!(t.caster.fire_period, CasterTunables::default().fire_period);
        assert_eq!(t.spawner.seed, Some(7));
        assert_eq!(t.spawner.period, 5.0);
        assert_eq!(t.bestiary.len(), 3);
    }

    #[test]
    fn broken_ron_is_a_parse_error() {
        let err = Tunables::from_ron("(caster: (speed: \"fast\"))").unwrap_err();
        assert!(matches!(err, TunablesError::Parse(_)));
    }

    #[test]
    fn shipped_tunables_parse() {
        let t = Tunables::from_ron(include_str!("../../assets/tunables.ron")).unwrap();
        assert_eq!(t.bestiary, EnemyArchetype::default_roster());
        assert_eq!(t.spawner.points, SpawnerTunables::default().points);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let t = Tunables::load_or_default("definitely/not/here.ron");
        assert_eq!(t.caster.max_health, 100);
    }
}
