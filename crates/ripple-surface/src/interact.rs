use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::grid::PoolLayout;
use crate::pass::Disturbance;

/// UV distance between consecutive trail stamps.
const TRAIL_SPACING: f32 = 0.015;
/// Base strength of a trail stamp before the distance term.
const TRAIL_BASE_STRENGTH: f32 = 0.01;
/// How quickly trail strength ramps with drag distance.
const TRAIL_GAIN: f32 = 8.0;

/// A discrete pointer event, queued by the host and applied at the top of
/// the frame. `point` is the host-picked intersection with the surface
/// plane; `on_body` reports whether the pointer ray hit the sphere first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerCommand {
    Down { point: Vec3, on_body: bool },
    Move { point: Vec3, on_body: bool },
    Up,
    Leave,
}

/// Everything the drained pointer commands ask of the current frame.
#[derive(Debug, Default)]
pub struct FrameInput {
    /// Stamps to inject, in arrival order.
    pub disturbances: SmallVec<[Disturbance; 8]>,
    /// Requested body position while a drag is active.
    pub drag_target: Option<Vec3>,
    /// A body drag ended this frame; lingering velocity is zeroed.
    pub released: bool,
}

/// Gesture state machine over pointer commands: dragging the body, or
/// disturbing the surface with single pokes and subdivided drag trails.
#[derive(Debug, Clone, Copy)]
pub struct InteractionController {
    /// UV radius of pointer-driven stamps.
    radius: f32,
    /// Peak strength of a single poke.
    strength: f32,
    dragging: bool,
    /// Trail session: where the last stamp landed, if a gesture is live.
    last_injected_uv: Option<Vec2>,
}

impl InteractionController {
    pub fn new(radius: f32, strength: f32) -> Self {
        Self {
            radius,
            strength,
            dragging: false,
            last_injected_uv: None,
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Applies a frame's worth of queued commands in arrival order.
    pub fn drain(
        &mut self,
        layout: &PoolLayout,
        commands: impl IntoIterator<Item = PointerCommand>,
    ) -> FrameInput {
        let mut input = FrameInput::default();

        for command in commands {
            self.apply(layout, command, &mut input);
        }

        input
    }

    fn apply(&mut self, layout: &PoolLayout, command: PointerCommand, input: &mut FrameInput) {
        match command {
            PointerCommand::Down { point, on_body } => {
                if on_body {
                    log::debug!("body drag started");
                    self.dragging = true;
                    self.last_injected_uv = None;
                    return;
                }

                let uv = layout.uv_from_world(point.x, point.z);
                if !in_domain(uv) {
                    self.last_injected_uv = None;
                    return;
                }

                input.disturbances.push(Disturbance {
                    center: uv,
                    radius: self.radius,
                    strength: self.strength,
                });
                self.last_injected_uv = Some(uv);
            }
            PointerCommand::Move { point, on_body } => {
                if self.dragging {
                    input.drag_target = Some(point);
                    return;
                }

                // Ripples directly under the body read as noise.
                if on_body {
                    self.last_injected_uv = None;
                    return;
                }

                let uv = layout.uv_from_world(point.x, point.z);
                if !in_domain(uv) {
                    self.last_injected_uv = None;
                    return;
                }

                if let Some(last) = self.last_injected_uv {
                    self.trail(last, uv, &mut input.disturbances);
                    self.last_injected_uv = Some(uv);
                }
            }
            PointerCommand::Up | PointerCommand::Leave => {
                if self.dragging {
                    log::debug!("body drag ended");
                    input.released = true;
                }
                self.dragging = false;
                self.last_injected_uv = None;
            }
        }
    }

    /// Subdivides the segment from `from` to `to` into evenly spaced stamps
    /// roughly [`TRAIL_SPACING`] apart.
    fn trail(&self, from: Vec2, to: Vec2, out: &mut SmallVec<[Disturbance; 8]>) {
        let dist = from.distance(to);
        if dist == 0.0 {
            return;
        }

        let strength = (TRAIL_BASE_STRENGTH + dist * self.strength * TRAIL_GAIN).min(self.strength);
        // The small bias keeps float noise at exact multiples of the
        // spacing from adding a stamp.
        let count = ((dist / TRAIL_SPACING - 1e-4).ceil() as usize).max(1);

        for k in 1..=count {
            out.push(Disturbance {
                center: from.lerp(to, k as f32 / count as f32),
                radius: self.radius,
                strength,
            });
        }
    }
}

#[inline]
fn in_domain(uv: Vec2) -> bool {
    (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)
}

/// Ambient wind: two opposite-signed gusts whose centers drift over the
/// surface on incommensurate sine tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    /// Peak strength of each gust. Zero disables wind.
    pub strength: f32,
    /// Footprint radius of each gust in UV units.
    pub radius: f32,
}

impl Wind {
    /// The two gusts for the given accumulated wave time. Opposite-signed
    /// strengths keep the surface from drifting upward or downward overall.
    pub fn gusts(&self, time: f32) -> [Disturbance; 2] {
        let first = Vec2::new(
            0.5 + 0.38 * (time * 0.71).sin(),
            0.5 + 0.38 * (time * 0.43).cos(),
        );
        let second = Vec2::new(
            0.5 + 0.38 * (time * 0.29).cos(),
            0.5 + 0.38 * (time * 0.61).sin(),
        );

        [
            Disturbance {
                center: first,
                radius: self.radius,
                strength: self.strength,
            },
            Disturbance {
                center: second,
                radius: self.radius,
                strength: -self.strength,
            },
        ]
    }
}
