use crate::animation::pose::Pose;
use crate::foundation::core::{Point, SCENE_FPS, SCENE_FRAME_COUNT};
use serde::Serialize;
use std::collections::BTreeMap;

/// Closed set of catalog object shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Axis-aligned rectangle of `width` × `height`, centered on the object position.
    Rect,
    /// Disc of `radius`.
    Circle,
    /// Closed outline through `points`, relative to the object position.
    Polygon,
    /// Stand-in drawn as a crossed box.
    Placeholder,
}

impl ObjectKind {
    /// Every accepted kind.
    pub const ALL: [ObjectKind; 4] = [Self::Rect, Self::Circle, Self::Polygon, Self::Placeholder];

    /// Interchange name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Polygon => "polygon",
            Self::Placeholder => "placeholder",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// Lifecycle status of an object at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStatus {
    /// Resting, not interacting.
    Idle,
    /// Carried by an actor.
    Attached,
    /// Ballistic.
    Flying,
    /// Broken apart; hidden from then on.
    Destroyed,
    /// Landed on the floor line.
    Fallen,
}

impl ObjectStatus {
    /// Every accepted status.
    pub const ALL: [ObjectStatus; 5] = [
        Self::Idle,
        Self::Attached,
        Self::Flying,
        Self::Destroyed,
        Self::Fallen,
    ];

    /// Interchange name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Attached => "attached",
            Self::Flying => "flying",
            Self::Destroyed => "destroyed",
            Self::Fallen => "fallen",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// Reusable prop definition, referenced by id from per-frame object states.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneObject {
    /// Unique catalog id.
    pub id: String,
    /// Shape kind.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Fill color as `#RRGGBB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Rect width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Rect height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Circle radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Polygon outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

impl SceneObject {
    /// A bare catalog entry with no color or geometry.
    pub fn new(id: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            kind,
            color: None,
            width: None,
            height: None,
            radius: None,
            points: None,
        }
    }
}

/// Scene-wide prop catalog keyed by object id.
pub type Catalog = BTreeMap<String, SceneObject>;

/// Placement of one catalog object at one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameObjectState {
    /// Catalog id this state refers to.
    pub id: String,
    /// Object origin.
    pub position: Point,
    /// Rotation in radians.
    pub rotation: f64,
    /// Lifecycle status.
    pub status: ObjectStatus,
    /// Hidden objects are skipped when drawing.
    pub visible: bool,
}

/// Transient, frame-scoped visual effect.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Effect {
    /// Free-form tag; `"bang"` is the only one the synthesizer emits.
    #[serde(rename = "type")]
    pub kind: String,
    /// Effect center.
    pub position: Point,
    /// Optional effect parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Effect {
    /// Tag of the impact burst.
    pub const BANG: &'static str = "bang";
}

/// Everything visible at one time step.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    /// Actor name → pose.
    pub actors: BTreeMap<String, Pose>,
    /// Object states in draw order.
    pub objects: Vec<FrameObjectState>,
    /// Effects in draw order.
    pub effects: Vec<Effect>,
}

impl Frame {
    /// State of object `id` in this frame, if placed.
    pub fn object(&self, id: &str) -> Option<&FrameObjectState> {
        self.objects.iter().find(|o| o.id == id)
    }
}

/// Validated, immutable animation document.
///
/// Only the synthesizer and the validator construct scenes, so every `Scene` value has exactly
/// [`SCENE_FRAME_COUNT`] frames at [`SCENE_FPS`], complete poses, and a catalog entry for every
/// referenced object id. A scene is replaced wholesale, never edited in place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    fps: u32,
    frames: Vec<Frame>,
    catalog: Catalog,
}

impl Scene {
    /// Assemble a scene whose invariants the caller has already established.
    pub(crate) fn from_parts(frames: Vec<Frame>, catalog: Catalog) -> Self {
        debug_assert_eq!(frames.len(), SCENE_FRAME_COUNT);
        Self {
            fps: SCENE_FPS,
            frames,
            catalog,
        }
    }

    /// Playback rate (always [`SCENE_FPS`]).
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames in time order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `index`, if in range.
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Prop catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
