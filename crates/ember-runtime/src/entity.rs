//! Entities: positioned, velocity-bearing objects in the shared registry.

use ember_core::{EntityId, Vec2};

/// Spawn-time description of an entity.
///
/// `kind` selects which hook set ([`HookTable`](crate::HookTable)) drives the
/// entity's per-frame behavior; it defaults to the spawn name.
#[derive(Debug, Clone)]
pub struct EntitySpec {
    pub name: String,
    pub kind: String,
    pub unique: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub collision: u32,
    pub expires_with: Option<String>,
}

impl EntitySpec {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: name.clone(),
            name,
            unique: false,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            collision: 0,
            expires_with: None,
        }
    }

    /// Hook set to dispatch for this entity (defaults to the spawn name).
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// With `unique`, a disambiguating suffix is appended so several
    /// entities can share a name prefix. Without it, spawning reuses the
    /// name: any existing entity with the same name is replaced.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.pos = Vec2::new(x, y);
        self
    }

    pub fn velocity(mut self, x: f64, y: f64) -> Self {
        self.vel = Vec2::new(x, y);
        self
    }

    /// Collision class tag used by filtered move/remove passes. Class 0
    /// entities are only matched by the wildcard filter.
    pub fn collision(mut self, class: u32) -> Self {
        self.collision = class;
        self
    }

    /// Remove this entity automatically when `state` exits the active set.
    pub fn expires_with(mut self, state: impl Into<String>) -> Self {
        self.expires_with = Some(state.into());
        self
    }
}

/// A live entity in the registry.
///
/// Position and velocity are public: move hooks steer by writing velocity,
/// and the scheduler applies `pos += vel` exactly once per matching move
/// pass, after the hook returns. The draw pass only ever sees `&Entity`.
pub struct Entity {
    id: EntityId,
    name: String,
    kind: String,
    pub pos: Vec2,
    pub vel: Vec2,
    collision: u32,
    expires_with: Option<String>,
}

impl Entity {
    pub(crate) fn from_spec(spec: EntitySpec) -> Self {
        let id = EntityId::new();
        let name = if spec.unique {
            format!("{}#{}", spec.name, id.raw())
        } else {
            spec.name
        };
        Self {
            id,
            name,
            kind: spec.kind,
            pos: spec.pos,
            vel: spec.vel,
            collision: spec.collision,
            expires_with: spec.expires_with,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Full name, including the unique suffix if one was generated.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn collision_class(&self) -> u32 {
        self.collision
    }

    pub fn expires_with(&self) -> Option<&str> {
        self.expires_with.as_deref()
    }

    /// Damp or amplify current velocity (e.g. a focus/slow modifier).
    pub fn scale_velocity(&mut self, factor: f64) {
        self.vel = self.vel * factor;
    }

    /// Filter predicate shared by move and remove passes: empty prefix
    /// matches every name, class 0 matches every entity.
    pub(crate) fn matches(&self, prefix: Option<&str>, class: u32) -> bool {
        let name_ok = match prefix {
            None | Some("") => true,
            Some(p) => self.name.starts_with(p),
        };
        name_ok && (class == 0 || self.collision == class)
    }

    pub(crate) fn apply_velocity(&mut self) {
        self.pos += self.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_spawn_gets_suffixed_name() {
        let a = Entity::from_spec(EntitySpec::new("bullet").unique(true));
        let b = Entity::from_spec(EntitySpec::new("bullet").unique(true));
        assert_ne!(a.name(), b.name());
        assert!(a.name().starts_with("bullet"));
        assert!(b.name().starts_with("bullet"));
    }

    #[test]
    fn non_unique_spawn_keeps_exact_name() {
        let e = Entity::from_spec(EntitySpec::new("player"));
        assert_eq!(e.name(), "player");
        assert_eq!(e.kind(), "player");
    }

    #[test]
    fn filter_matching() {
        let e = Entity::from_spec(EntitySpec::new("bullet").unique(true).collision(2));
        assert!(e.matches(None, 0));
        assert!(e.matches(Some(""), 0));
        assert!(e.matches(Some("bul"), 2));
        assert!(!e.matches(Some("player"), 2));
        assert!(!e.matches(Some("bul"), 1));
    }

    #[test]
    fn velocity_applies_after_scaling() {
        let mut e = Entity::from_spec(EntitySpec::new("p").at(10.0, 10.0).velocity(3.0, -3.0));
        e.scale_velocity(0.4);
        e.apply_velocity();
        assert!((e.pos.x - 11.2).abs() < 1e-10);
        assert!((e.pos.y - 8.8).abs() < 1e-10);
    }
}
