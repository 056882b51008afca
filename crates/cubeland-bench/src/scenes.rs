use cubeland_sim::input::InputState;

/// Input pattern replayed by a scene, one [`InputState`] per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Stand at the spawn point.
    Idle,
    /// Walk forward while slowly turning, dragging the visible window across
    /// the terrain.
    Walk,
    /// Walk forward, holding jump for two thirds of every half second.
    JumpWalk,
    /// Look down ahead, alternately digging and building with every slot.
    BuildAndDig,
}

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub script: Script,
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "idle",
            script: Script::Idle,
        },
        SceneConfig {
            name: "walk",
            script: Script::Walk,
        },
        SceneConfig {
            name: "jump-walk",
            script: Script::JumpWalk,
        },
        SceneConfig {
            name: "build-and-dig",
            script: Script::BuildAndDig,
        },
    ]
}

/// Input for `tick` of `script`. Pure function of its arguments so every
/// run replays the same session.
pub fn scripted_input(script: Script, tick: u32) -> InputState {
    let t = tick as f32;
    match script {
        Script::Idle => InputState::default(),
        Script::Walk => InputState {
            forward: true,
            ..Default::default()
        }
        .with_look(t * 0.01, 0.0),
        Script::JumpWalk => InputState {
            forward: true,
            jump: tick % 30 < 20,
            ..Default::default()
        }
        .with_look(t * 0.005, 0.0),
        Script::BuildAndDig => {
            // Turn a quarter step every 40 ticks so edits spread out.
            let yaw = (tick / 40) as f32 * std::f32::consts::FRAC_PI_8;
            InputState {
                break_block: tick % 10 == 0,
                place_block: tick % 10 == 5,
                select_slot: Some(((tick / 10) % 5) as usize),
                ..Default::default()
            }
            .with_look(yaw, -0.7)
        }
    }
}
