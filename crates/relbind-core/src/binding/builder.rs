use super::Metamodel;

/// Configures how a [`Metamodel`] behaves while it is being built.
#[derive(Debug, Clone)]
pub struct Builder {
    /// What registering an attribute name twice on one container does
    attribute_name_collision: NameCollision,

    /// Run [`Metamodel::verify`] from [`Metamodel::finish`]
    verify_on_finish: bool,
}

/// Policy for registering an attribute binding under a name that is already
/// taken on the same container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameCollision {
    /// The new binding silently takes the name over.
    #[default]
    Replace,

    /// Registration fails with an internal consistency error.
    Reject,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            attribute_name_collision: NameCollision::Replace,
            verify_on_finish: true,
        }
    }

    pub fn attribute_name_collision(&mut self, policy: NameCollision) -> &mut Self {
        self.attribute_name_collision = policy;
        self
    }

    pub fn verify_on_finish(&mut self, verify: bool) -> &mut Self {
        self.verify_on_finish = verify;
        self
    }

    pub fn build(&self) -> Metamodel {
        Metamodel::with_config(self.attribute_name_collision, self.verify_on_finish)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
