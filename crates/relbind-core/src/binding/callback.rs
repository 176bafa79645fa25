use crate::domain::ClassRef;

/// A class contributing lifecycle callbacks to an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpaCallbackSource {
    /// The entity class itself or a registered listener.
    pub callback_class: ClassRef,

    /// True if the class is a listener rather than the entity class.
    pub listener: bool,

    /// Method names per lifecycle event, in declaration order.
    pub callbacks: Vec<(CallbackType, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallbackType {
    PrePersist,
    PostPersist,
    PreRemove,
    PostRemove,
    PreUpdate,
    PostUpdate,
    PostLoad,
}

impl JpaCallbackSource {
    pub fn callback_method(&self, ty: CallbackType) -> Option<&str> {
        self.callbacks
            .iter()
            .find(|(callback_ty, _)| *callback_ty == ty)
            .map(|(_, method)| method.as_str())
    }
}
