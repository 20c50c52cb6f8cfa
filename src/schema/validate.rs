use crate::animation::pose::{JointName, Pose};
use crate::foundation::core::{Point, SCENE_FPS, SCENE_FRAME_COUNT};
use crate::scene::model::{
    Catalog, Effect, Frame, FrameObjectState, ObjectKind, ObjectStatus, Scene, SceneObject,
};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One step of a JSON path into the scene document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Fixed field name.
    Field(&'static str),
    /// Document-supplied map key (actor name, catalog id, joint name).
    Key(String),
    /// Array index.
    Index(usize),
}

/// Structural violation: a field with the wrong type, value, or shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    path: Vec<SchemaPathElem>,
    message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Path of the offending field, e.g. `$.frames[3].actors.A.handR`.
    pub fn path(&self) -> String {
        format_path(&self.path)
    }

    /// Expected constraint that was violated.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Key(key) => {
                s.push('.');
                s.push_str(key);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Referential-integrity violation: a frame places an object the catalog does not define.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DanglingObjectRef {
    /// Frame index of the offending object state.
    pub frame: usize,
    /// Object id missing from the catalog.
    pub id: String,
}

impl fmt::Display for DanglingObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {}: object id \"{}\" is not in the catalog",
            self.frame, self.id
        )
    }
}

/// Every violation found in one validation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneErrors {
    structural: Vec<SchemaError>,
    referential: Vec<DanglingObjectRef>,
}

impl SceneErrors {
    /// Structural violations, in document order.
    pub fn structural(&self) -> &[SchemaError] {
        &self.structural
    }

    /// Referential-integrity violations, ordered by frame then id.
    pub fn referential(&self) -> &[DanglingObjectRef] {
        &self.referential
    }

    /// Total number of violations.
    pub fn len(&self) -> usize {
        self.structural.len() + self.referential.len()
    }

    /// `true` when nothing was found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SceneErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .structural
            .iter()
            .map(|e| e.to_string())
            .chain(self.referential.iter().map(|e| e.to_string()));
        for (i, line) in lines.enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SceneErrors {}

/// Validate an untyped document and convert it into a [`Scene`].
///
/// Runs the structural pass over the whole document, then the referential pass over every
/// object id that was read. Nothing fails fast: the error carries every finding.
#[tracing::instrument(skip(doc))]
pub fn parse_scene(doc: &Value) -> Result<Scene, SceneErrors> {
    let mut walk = Walk::default();

    // Pass 1: structure.
    let parsed = walk.scene(doc);

    // Pass 2: every id read in pass 1 against the catalog's keys.
    let mut referential = BTreeSet::new();
    if let Some(keys) = catalog_keys(doc) {
        for (frame, id) in &walk.refs {
            if !keys.contains(id.as_str()) {
                referential.insert(DanglingObjectRef {
                    frame: *frame,
                    id: id.clone(),
                });
            }
        }
    }

    let errors = SceneErrors {
        structural: walk.errors,
        referential: referential.into_iter().collect(),
    };
    match parsed {
        Some((frames, catalog)) if errors.is_empty() => Ok(Scene::from_parts(frames, catalog)),
        _ => {
            tracing::debug!(violations = errors.len(), "scene rejected");
            Err(errors)
        }
    }
}

fn catalog_keys(doc: &Value) -> Option<BTreeSet<&str>> {
    let catalog = doc.as_object()?.get("catalog")?.as_object()?;
    Some(catalog.keys().map(String::as_str).collect())
}

#[derive(Default)]
struct Walk {
    path: Vec<SchemaPathElem>,
    errors: Vec<SchemaError>,
    // (frame index, object id) for every object state whose id was a string.
    refs: Vec<(usize, String)>,
}

impl Walk {
    fn fail(&mut self, message: impl Into<String>) {
        self.errors.push(SchemaError::at(&self.path, message));
    }

    fn within<T>(&mut self, elem: SchemaPathElem, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(elem);
        let out = f(self);
        self.path.pop();
        out
    }

    fn object<'v>(&mut self, v: &'v Value) -> Option<&'v Map<String, Value>> {
        let obj = v.as_object();
        if obj.is_none() {
            self.fail(format!("expected an object, found {}", kind_of(v)));
        }
        obj
    }

    fn required<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        name: &'static str,
    ) -> Option<&'v Value> {
        let v = obj.get(name);
        if v.is_none() {
            self.within(SchemaPathElem::Field(name), |w| w.fail("required field is missing"));
        }
        v
    }

    fn number(&mut self, v: &Value) -> Option<f64> {
        let n = v.as_f64();
        if n.is_none() {
            self.fail(format!("expected a number, found {}", kind_of(v)));
        }
        n
    }

    fn string<'v>(&mut self, v: &'v Value) -> Option<&'v str> {
        let s = v.as_str();
        if s.is_none() {
            self.fail(format!("expected a string, found {}", kind_of(v)));
        }
        s
    }

    fn boolean(&mut self, v: &Value) -> Option<bool> {
        let b = v.as_bool();
        if b.is_none() {
            self.fail(format!("expected a boolean, found {}", kind_of(v)));
        }
        b
    }

    fn array<'v>(&mut self, v: &'v Value) -> Option<&'v Vec<Value>> {
        let a = v.as_array();
        if a.is_none() {
            self.fail(format!("expected an array, found {}", kind_of(v)));
        }
        a
    }

    fn required_field<T>(
        &mut self,
        obj: &Map<String, Value>,
        name: &'static str,
        f: impl FnOnce(&mut Self, &Value) -> Option<T>,
    ) -> Option<T> {
        let v = self.required(obj, name)?;
        self.within(SchemaPathElem::Field(name), |w| f(w, v))
    }

    // `Ok(None)` when absent, `Err(())` when present but invalid.
    fn optional_field<T>(
        &mut self,
        obj: &Map<String, Value>,
        name: &'static str,
        f: impl FnOnce(&mut Self, &Value) -> Option<T>,
    ) -> Result<Option<T>, ()> {
        match obj.get(name) {
            None => Ok(None),
            Some(v) => self
                .within(SchemaPathElem::Field(name), |w| f(w, v))
                .map(Some)
                .ok_or(()),
        }
    }

    fn scene(&mut self, doc: &Value) -> Option<(Vec<Frame>, Catalog)> {
        let root = self.object(doc)?;

        let fps_ok = self
            .required_field(root, "fps", |w, v| {
                let fps = w.number(v)?;
                if fps != f64::from(SCENE_FPS) {
                    w.fail(format!("fps must be {SCENE_FPS}, found {fps}"));
                    return None;
                }
                Some(())
            })
            .is_some();

        let frames = self.required_field(root, "frames", |w, v| w.frames(v));
        let catalog = self.required_field(root, "catalog", |w, v| w.catalog(v));

        match (fps_ok, frames, catalog) {
            (true, Some(frames), Some(catalog)) => Some((frames, catalog)),
            _ => None,
        }
    }

    fn frames(&mut self, v: &Value) -> Option<Vec<Frame>> {
        let items = self.array(v)?;
        let len_ok = items.len() == SCENE_FRAME_COUNT;
        if !len_ok {
            self.fail(format!(
                "expected exactly {SCENE_FRAME_COUNT} frames, found {}",
                items.len()
            ));
        }

        // Frames are still checked individually so one run reports everything.
        let mut frames = Vec::with_capacity(items.len());
        let mut all_ok = true;
        for (i, item) in items.iter().enumerate() {
            match self.within(SchemaPathElem::Index(i), |w| w.frame(i, item)) {
                Some(frame) => frames.push(frame),
                None => all_ok = false,
            }
        }

        (len_ok && all_ok).then_some(frames)
    }

    fn frame(&mut self, index: usize, v: &Value) -> Option<Frame> {
        let obj = self.object(v)?;

        let actors = self.required_field(obj, "actors", |w, v| w.actors(v));
        let objects = self.required_field(obj, "objects", |w, v| {
            w.list(v, |w, item| w.object_state(index, item))
        });
        let effects = self.required_field(obj, "effects", |w, v| w.list(v, Walk::effect));

        Some(Frame {
            actors: actors?,
            objects: objects?,
            effects: effects?,
        })
    }

    fn list<T>(
        &mut self,
        v: &Value,
        mut item: impl FnMut(&mut Self, &Value) -> Option<T>,
    ) -> Option<Vec<T>> {
        let items = self.array(v)?;
        let mut out = Vec::with_capacity(items.len());
        let mut all_ok = true;
        for (i, it) in items.iter().enumerate() {
            match self.within(SchemaPathElem::Index(i), |w| item(w, it)) {
                Some(x) => out.push(x),
                None => all_ok = false,
            }
        }
        all_ok.then_some(out)
    }

    fn actors(&mut self, v: &Value) -> Option<BTreeMap<String, Pose>> {
        let obj = self.object(v)?;
        let mut actors = BTreeMap::new();
        let mut all_ok = true;
        for (name, pose) in obj {
            match self.within(SchemaPathElem::Key(name.clone()), |w| w.pose(pose)) {
                Some(p) => {
                    actors.insert(name.clone(), p);
                }
                None => all_ok = false,
            }
        }
        all_ok.then_some(actors)
    }

    fn pose(&mut self, v: &Value) -> Option<Pose> {
        let obj = self.object(v)?;
        let mut joints: [Option<Point>; JointName::COUNT] = [None; JointName::COUNT];
        let mut all_ok = true;

        for (name, p) in obj {
            self.within(SchemaPathElem::Key(name.clone()), |w| {
                let Ok(joint) = name.parse::<JointName>() else {
                    w.fail(format!("unknown joint \"{name}\""));
                    all_ok = false;
                    return;
                };
                match w.point(p) {
                    Some(p) => joints[joint as usize] = Some(p),
                    None => all_ok = false,
                }
            });
        }

        for joint in JointName::ALL {
            if joints[joint as usize].is_none() && !obj.contains_key(joint.as_str()) {
                self.fail(format!("missing joint \"{joint}\""));
                all_ok = false;
            }
        }

        if !all_ok {
            return None;
        }
        let mut out = [Point::ZERO; JointName::COUNT];
        for (slot, p) in joints.into_iter().enumerate() {
            out[slot] = p?;
        }
        Some(Pose::from_joints(out))
    }

    fn point(&mut self, v: &Value) -> Option<Point> {
        let obj = self.object(v)?;
        let x = self.required_field(obj, "x", Walk::number);
        let y = self.required_field(obj, "y", Walk::number);
        Some(Point::new(x?, y?))
    }

    fn object_state(&mut self, frame: usize, v: &Value) -> Option<FrameObjectState> {
        let obj = self.object(v)?;

        let id = self.required_field(obj, "id", |w, v| w.string(v).map(str::to_owned));
        if let Some(id) = &id {
            self.refs.push((frame, id.clone()));
        }
        let position = self.required_field(obj, "position", Walk::point);
        let rotation = self.required_field(obj, "rotation", Walk::number);
        let status = self.required_field(obj, "status", |w, v| {
            let s = w.string(v)?;
            let status = ObjectStatus::parse(s);
            if status.is_none() {
                w.fail(format!(
                    "unknown status \"{s}\" (expected one of {})",
                    one_of(ObjectStatus::ALL.map(ObjectStatus::as_str))
                ));
            }
            status
        });
        let visible = self.required_field(obj, "visible", Walk::boolean);

        Some(FrameObjectState {
            id: id?,
            position: position?,
            rotation: rotation?,
            status: status?,
            visible: visible?,
        })
    }

    fn effect(&mut self, v: &Value) -> Option<Effect> {
        let obj = self.object(v)?;

        let kind = self.required_field(obj, "type", |w, v| w.string(v).map(str::to_owned));
        let position = self.required_field(obj, "position", Walk::point);
        let params = self.optional_field(obj, "params", |w, v| w.object(v).cloned());

        Some(Effect {
            kind: kind?,
            position: position?,
            params: params.ok()?,
        })
    }

    fn catalog(&mut self, v: &Value) -> Option<Catalog> {
        let obj = self.object(v)?;
        let mut catalog = Catalog::new();
        let mut all_ok = true;
        for (key, entry) in obj {
            match self.within(SchemaPathElem::Key(key.clone()), |w| w.scene_object(key, entry)) {
                Some(o) => {
                    catalog.insert(key.clone(), o);
                }
                None => all_ok = false,
            }
        }
        all_ok.then_some(catalog)
    }

    fn scene_object(&mut self, key: &str, v: &Value) -> Option<SceneObject> {
        let obj = self.object(v)?;

        let id = self.required_field(obj, "id", |w, v| {
            let id = w.string(v)?;
            if id != key {
                w.fail(format!("id \"{id}\" must match its catalog key \"{key}\""));
                return None;
            }
            Some(id.to_owned())
        });
        let kind = self.required_field(obj, "type", |w, v| {
            let s = w.string(v)?;
            let kind = ObjectKind::parse(s);
            if kind.is_none() {
                w.fail(format!(
                    "unknown object type \"{s}\" (expected one of {})",
                    one_of(ObjectKind::ALL.map(ObjectKind::as_str))
                ));
            }
            kind
        });
        let color = self.optional_field(obj, "color", |w, v| w.string(v).map(str::to_owned));
        let width = self.optional_field(obj, "width", Walk::number);
        let height = self.optional_field(obj, "height", Walk::number);
        let radius = self.optional_field(obj, "radius", Walk::number);
        let points = self.optional_field(obj, "points", |w, v| w.list(v, Walk::point));

        Some(SceneObject {
            id: id?,
            kind: kind?,
            color: color.ok()?,
            width: width.ok()?,
            height: height.ok()?,
            radius: radius.ok()?,
            points: points.ok()?,
        })
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn one_of<const N: usize>(names: [&str; N]) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
