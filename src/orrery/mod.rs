mod body;
mod clock;
mod draw;
mod scene;

pub use body::{BodyFrame, BodyInfo, BodySpec, FrameKind, OrbitalElements, OrbitingBody};
pub use clock::{FixedTimestep, FpsCounter, SceneClock, DEFAULT_MAX_STEPS_PER_FRAME};
pub use draw::{DrawCommand, DrawList, Facing, RenderTarget, RingDraw, SphereDraw};
pub use scene::{Scene, ECLIPTIC_LABEL, SKY_LABEL, SUN_LABEL};
