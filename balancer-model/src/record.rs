use crate::{EntityId, EntityKind, ExtraAttrs, ModelError, ModelResult};

/// Behaviour shared by every persisted record type.
///
/// Implementors only supply field access; `validate` has a default that
/// checks the identifier, which is all most kinds need.
pub trait Record {
    /// The kind discriminant for this record type.
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn extra(&self) -> &ExtraAttrs;

    fn extra_mut(&mut self) -> &mut ExtraAttrs;

    /// Checks the preconditions for writing this record.
    fn validate(&self) -> ModelResult<()> {
        if self.id().is_valid() {
            Ok(())
        } else {
            Err(ModelError::Invalid {
                kind: Self::KIND.as_str(),
                reason: format!("identifier must be positive, got {}", self.id()),
            })
        }
    }
}

macro_rules! impl_record {
    ($ty:ty, $kind:expr) => {
        impl $crate::Record for $ty {
            const KIND: $crate::EntityKind = $kind;

            fn id(&self) -> $crate::EntityId {
                self.id
            }

            fn extra(&self) -> &$crate::ExtraAttrs {
                &self.extra
            }

            fn extra_mut(&mut self) -> &mut $crate::ExtraAttrs {
                &mut self.extra
            }
        }
    };
}

pub(crate) use impl_record;
