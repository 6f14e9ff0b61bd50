//! Arena-based scene hierarchy.
//!
//! Objects live in a dense `Vec` and refer to each other by [`ObjectId`]
//! index. Mesh data is shared read-only via `Arc` so that build tasks can
//! snapshot a scene without copying geometry.

use std::sync::Arc;

use crate::bounds::Aabb;
use crate::mesh::MeshData;

/// Index of an object within its [`Scene`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

/// Identifier of a partition group, assigned by the partitioner in pre-order
/// so that identical input always yields identical ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u32);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of the scene hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    /// Human-readable name (not required to be unique).
    pub name: String,
    /// Parent object, `None` for the root.
    pub parent: Option<ObjectId>,
    /// Child objects in insertion order.
    pub children: Vec<ObjectId>,
    /// Optional renderable mesh attached to this object.
    pub mesh: Option<Arc<MeshData>>,
}

/// A scene hierarchy rooted at object 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Creates a scene containing only a root object with the given name.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            objects: vec![SceneObject {
                name: root_name.into(),
                parent: None,
                children: Vec::new(),
                mesh: None,
            }],
        }
    }

    pub fn root(&self) -> ObjectId {
        ObjectId(0)
    }

    /// Adds a child object under `parent` and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is out of range — ids are only produced by this
    /// scene, so that indicates a programming error.
    pub fn add_object(&mut self, parent: ObjectId, name: impl Into<String>) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(SceneObject {
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            mesh: None,
        });
        self.objects[parent.0 as usize].children.push(id);
        id
    }

    /// Attaches a mesh to an object, replacing any previous mesh.
    pub fn set_mesh(&mut self, id: ObjectId, mesh: Arc<MeshData>) {
        self.objects[id.0 as usize].mesh = Some(mesh);
    }

    pub fn object(&self, id: ObjectId) -> &SceneObject {
        &self.objects[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates over all objects that carry a mesh, in id order.
    pub fn mesh_objects(&self) -> impl Iterator<Item = (ObjectId, &Arc<MeshData>)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, obj)| obj.mesh.as_ref().map(|m| (ObjectId(i as u32), m)))
    }

    /// Bounding box of the object's own mesh, or `None` if it has no mesh.
    pub fn object_bounds(&self, id: ObjectId) -> Option<Aabb> {
        self.object(id).mesh.as_ref().map(|m| m.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MaterialId, VertexFormat};
    use glam::Vec3;

    fn tri_at(x: f32) -> Arc<MeshData> {
        Arc::new(MeshData::new(
            vec![
                Vec3::new(x, 0.0, 0.0),
                Vec3::new(x + 1.0, 0.0, 0.0),
                Vec3::new(x, 1.0, 0.0),
            ],
            vec![0, 1, 2],
            MaterialId(0),
            VertexFormat::Position,
        ))
    }

    #[test]
    fn test_add_object_links_parent_and_child() {
        let mut scene = Scene::new("root");
        let a = scene.add_object(scene.root(), "a");
        let b = scene.add_object(a, "b");
        assert_eq!(scene.object(a).parent, Some(scene.root()));
        assert_eq!(scene.object(a).children, vec![b]);
        assert_eq!(scene.object(b).parent, Some(a));
    }

    #[test]
    fn test_mesh_objects_skips_empty_nodes() {
        let mut scene = Scene::new("root");
        let a = scene.add_object(scene.root(), "a");
        let _empty = scene.add_object(scene.root(), "empty");
        let b = scene.add_object(scene.root(), "b");
        scene.set_mesh(a, tri_at(0.0));
        scene.set_mesh(b, tri_at(5.0));

        let ids: Vec<ObjectId> = scene.mesh_objects().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_object_bounds() {
        let mut scene = Scene::new("root");
        let a = scene.add_object(scene.root(), "a");
        assert!(scene.object_bounds(a).is_none());
        scene.set_mesh(a, tri_at(2.0));
        let bounds = scene.object_bounds(a).unwrap();
        assert_eq!(bounds.min, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_clone_is_structurally_equal() {
        let mut scene = Scene::new("root");
        let a = scene.add_object(scene.root(), "a");
        scene.set_mesh(a, tri_at(0.0));
        let copy = scene.clone();
        assert_eq!(scene, copy);
    }
}
