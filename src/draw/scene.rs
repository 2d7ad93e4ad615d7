//! Scene host: the single mutable drawing surface.

use super::color::Color;
use super::shape::{Point, Shape};
use super::style::StrokeStyle;
use serde::{Deserialize, Serialize};

/// Identifier assigned to an object when it is added to a [`Scene`].
pub type ObjectId = u64;

/// What an object is for. Only [`ObjectRole::Content`] is artwork.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectRole {
    /// Committed artwork
    Content,
    /// Symmetry axis line; never exported, serialized or selectable
    Guide,
    /// Live geometry of an in-progress gesture
    Preview,
    /// Polygon vertex marker shown while a polygon is being built
    Marker,
}

/// A drawable object living in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub shape: Shape,
    pub style: StrokeStyle,
    pub role: ObjectRole,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl SceneObject {
    /// Whether the select tool may pick this object up.
    pub fn is_selectable(&self) -> bool {
        self.role == ObjectRole::Content && self.visible
    }
}

/// Builds a new, not yet added, scene object from a style descriptor and geometry.
///
/// The id is assigned by [`Scene::add_object`].
pub fn create_object(shape: Shape, style: StrokeStyle, role: ObjectRole) -> SceneObject {
    SceneObject {
        id: 0,
        shape,
        style,
        role,
        visible: true,
    }
}

/// Change notifications emitted by every scene mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    Added { id: ObjectId, role: ObjectRole },
    Removed { id: ObjectId, role: ObjectRole },
    Modified { id: ObjectId, role: ObjectRole },
    Cleared,
    Restored,
    Resized { width: u32, height: u32 },
}

impl SceneEvent {
    /// Returns true if the event changed committed artwork.
    pub fn touches_content(&self) -> bool {
        match self {
            SceneEvent::Added { role, .. }
            | SceneEvent::Removed { role, .. }
            | SceneEvent::Modified { role, .. } => *role == ObjectRole::Content,
            SceneEvent::Cleared => true,
            SceneEvent::Restored | SceneEvent::Resized { .. } => false,
        }
    }
}

/// Serialized copy of the scene's content objects.
///
/// Guides, previews and markers are never part of a snapshot; they are
/// re-derived from editor state after a restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    /// Snapshot of a scene without content.
    pub fn empty() -> Self {
        Snapshot(r#"{"objects":[]}"#.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    objects: Vec<&'a SceneObject>,
}

#[derive(Deserialize)]
struct SnapshotIn {
    objects: Vec<SceneObject>,
}

/// Ordered collection of drawable objects plus background and surface size.
///
/// Objects are kept in paint order (first = bottom, last = top).
#[derive(Debug)]
pub struct Scene {
    objects: Vec<SceneObject>,
    width: u32,
    height: u32,
    background: Color,
    next_id: ObjectId,
    events: Vec<SceneEvent>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            objects: Vec::new(),
            width,
            height,
            background,
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Surface center as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// All objects in paint order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Committed artwork in paint order.
    pub fn content_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects
            .iter()
            .filter(|obj| obj.role == ObjectRole::Content)
    }

    pub fn content_count(&self) -> usize {
        self.content_objects().count()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.id == id)
    }

    /// Adds an object on top of the paint order and returns its new id.
    pub fn add_object(&mut self, mut object: SceneObject) -> ObjectId {
        object.id = self.next_id;
        self.next_id += 1;
        self.events.push(SceneEvent::Added {
            id: object.id,
            role: object.role,
        });
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Removes an object, returning it if it existed.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|obj| obj.id == id)?;
        let object = self.objects.remove(index);
        self.events.push(SceneEvent::Removed {
            id,
            role: object.role,
        });
        Some(object)
    }

    /// Removes every object with the given role; returns how many were removed.
    pub fn remove_role(&mut self, role: ObjectRole) -> usize {
        let ids: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|obj| obj.role == role)
            .map(|obj| obj.id)
            .collect();
        for id in &ids {
            self.remove_object(*id);
        }
        ids.len()
    }

    /// Applies `edit` to an object and records a modification.
    ///
    /// Returns false when the object does not exist.
    pub fn modify(&mut self, id: ObjectId, edit: impl FnOnce(&mut SceneObject)) -> bool {
        let Some(object) = self.objects.iter_mut().find(|obj| obj.id == id) else {
            return false;
        };
        edit(object);
        let role = object.role;
        self.events.push(SceneEvent::Modified { id, role });
        true
    }

    /// Turns a preview object into committed content.
    pub fn promote(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.objects.iter_mut().find(|obj| obj.id == id) else {
            return false;
        };
        object.role = ObjectRole::Content;
        self.events.push(SceneEvent::Added {
            id,
            role: ObjectRole::Content,
        });
        true
    }

    /// Removes every object, guides included.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.events.push(SceneEvent::Cleared);
    }

    /// Changes the paintable surface size. Object coordinates are left untouched.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.events.push(SceneEvent::Resized { width, height });
    }

    /// Hides every visible guide and returns the ids that were hidden.
    pub fn hide_guides(&mut self) -> Vec<ObjectId> {
        self.objects
            .iter_mut()
            .filter(|obj| obj.role == ObjectRole::Guide && obj.visible)
            .map(|obj| {
                obj.visible = false;
                obj.id
            })
            .collect()
    }

    /// Makes the given objects visible again.
    pub fn show_objects(&mut self, ids: &[ObjectId]) {
        for obj in self.objects.iter_mut().filter(|obj| ids.contains(&obj.id)) {
            obj.visible = true;
        }
    }

    /// Finds the top-most selectable object under `point`.
    pub fn top_hit(&self, point: Point, tolerance: f64) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .filter(|obj| obj.is_selectable())
            .find(|obj| obj.shape.hit_test(point, obj.style.width / 2.0 + tolerance))
            .map(|obj| obj.id)
    }

    /// Serializes the content objects into an opaque snapshot.
    pub fn serialize(&self) -> Result<Snapshot, serde_json::Error> {
        let out = SnapshotOut {
            objects: self.content_objects().collect(),
        };
        serde_json::to_string(&out).map(Snapshot)
    }

    /// Replaces the whole object set with the snapshot's objects.
    ///
    /// The snapshot is decoded before anything is touched, so a corrupt snapshot
    /// leaves the scene as it was.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), serde_json::Error> {
        let decoded: SnapshotIn = serde_json::from_str(snapshot.as_str())?;
        self.objects.clear();
        self.objects = decoded.objects;
        let max_id = self.objects.iter().map(|obj| obj.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        self.events.push(SceneEvent::Restored);
        Ok(())
    }

    /// Drains the change notifications recorded since the last call.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED, WHITE};

    fn rect(left: f64) -> Shape {
        Shape::Rect {
            left,
            top: 10.0,
            width: 20.0,
            height: 20.0,
        }
    }

    fn content(shape: Shape) -> SceneObject {
        create_object(shape, StrokeStyle::outline(RED, 2.0), ObjectRole::Content)
    }

    #[test]
    fn add_and_remove_emit_events() {
        let mut scene = Scene::new(200, 200, WHITE);
        let id = scene.add_object(content(rect(0.0)));
        assert!(scene.remove_object(id).is_some());
        assert!(scene.remove_object(id).is_none());

        let events = scene.take_events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(SceneEvent::touches_content));
        assert!(scene.take_events().is_empty());
    }

    #[test]
    fn snapshot_excludes_guides_and_restore_replaces() {
        let mut scene = Scene::new(200, 200, WHITE);
        scene.add_object(content(rect(0.0)));
        scene.add_object(create_object(
            rect(50.0),
            StrokeStyle::outline(BLUE, 1.0),
            ObjectRole::Guide,
        ));
        let snapshot = scene.serialize().expect("serializable");
        assert!(!snapshot.as_str().contains("guide"));

        scene.add_object(content(rect(100.0)));
        scene.restore(&snapshot).expect("restorable");

        assert_eq!(scene.objects().len(), 1);
        assert_eq!(scene.objects()[0].shape, rect(0.0));
    }

    #[test]
    fn restore_keeps_ids_unique() {
        let mut scene = Scene::new(100, 100, WHITE);
        let first = scene.add_object(content(rect(0.0)));
        let snapshot = scene.serialize().unwrap();
        scene.restore(&snapshot).unwrap();
        let second = scene.add_object(content(rect(5.0)));
        assert_ne!(first, second);
    }

    #[test]
    fn corrupt_snapshot_leaves_scene_untouched() {
        let mut scene = Scene::new(100, 100, WHITE);
        scene.add_object(content(rect(0.0)));
        assert!(scene.restore(&Snapshot("not json".into())).is_err());
        assert_eq!(scene.content_count(), 1);
    }

    #[test]
    fn empty_scene_serializes_to_empty_snapshot() {
        let scene = Scene::new(10, 10, WHITE);
        assert_eq!(scene.serialize().unwrap(), Snapshot::empty());
    }

    #[test]
    fn resize_preserves_coordinates() {
        let mut scene = Scene::new(100, 100, WHITE);
        scene.add_object(content(rect(40.0)));
        scene.set_dimensions(400, 300);
        assert_eq!((scene.width(), scene.height()), (400, 300));
        assert_eq!(scene.objects()[0].shape, rect(40.0));
    }

    #[test]
    fn top_hit_prefers_latest_and_skips_guides() {
        let mut scene = Scene::new(200, 200, WHITE);
        let bottom = scene.add_object(content(rect(0.0)));
        let top = scene.add_object(content(rect(5.0)));
        scene.add_object(create_object(
            rect(0.0),
            StrokeStyle::outline(BLUE, 1.0),
            ObjectRole::Guide,
        ));

        assert_eq!(scene.top_hit(Point::new(15.0, 15.0), 0.0), Some(top));
        assert_eq!(scene.top_hit(Point::new(2.0, 15.0), 0.0), Some(bottom));
        assert_eq!(scene.top_hit(Point::new(150.0, 150.0), 0.0), None);
    }

    #[test]
    fn guides_hide_and_show() {
        let mut scene = Scene::new(200, 200, WHITE);
        scene.add_object(create_object(
            rect(0.0),
            StrokeStyle::outline(BLUE, 1.0),
            ObjectRole::Guide,
        ));
        let hidden = scene.hide_guides();
        assert_eq!(hidden.len(), 1);
        assert!(scene.objects().iter().all(|obj| !obj.visible));
        scene.show_objects(&hidden);
        assert!(scene.objects().iter().all(|obj| obj.visible));
    }
}
