//! Object reconstruction

use std::sync::Arc;

use anyhow::anyhow;
use log::trace;

use super::defaults::placeholders;
use super::{Fill, Session};
use crate::error::{CopyError, Result};
use crate::value::{Handle, Identity, ObjectRef, Value};

impl Session<'_> {
    /// Build an empty shell of the object's exact class through its first
    /// constructor, called with placeholder arguments.
    pub(super) fn alloc_object(
        &mut self,
        id: Identity,
        original: &Value,
        source: &ObjectRef,
    ) -> Result<Value> {
        let class = source.class();
        let params = match class.constructors().first() {
            Some(ctor) => &ctor.params,
            None => {
                return Err(CopyError::NoConstructor {
                    class: class.name().to_string(),
                })
            }
        };
        let args = placeholders(params);
        trace!("constructing {} shell with {} args", class.name(), args.len());

        let instance = class.instantiate(&args)?;
        if !Arc::ptr_eq(instance.class(), &class) {
            return Err(CopyError::Construction {
                class: class.name().to_string(),
                source: anyhow!(
                    "constructor returned an instance of `{}`",
                    instance.class().name()
                ),
            });
        }

        let shell = Handle::new(instance);
        let task = Fill::Object {
            source: source.clone(),
            shell: shell.clone(),
        };
        self.enqueue(id, original, Value::Object(shell), task)
    }

    /// Overwrite every declared field of the shell with the copy of the
    /// original's value. Absent fields are written as absent, replacing
    /// whatever the constructor put there.
    pub(super) fn fill_object(&mut self, source: &ObjectRef, shell: &ObjectRef) -> Result<()> {
        let class = source.class();
        let values = source.snapshot();

        let mut copies = Vec::with_capacity(class.fields().len());
        for (index, field) in class.fields().iter().enumerate() {
            let value = values.get(index).ok_or_else(|| CopyError::FieldAccess {
                class: class.name().to_string(),
                field: field.name.clone(),
                reason: "field is missing from the instance".to_string(),
            })?;
            let copy = match value {
                Value::Null => Value::Null,
                value => self.visit(value)?,
            };
            copies.push(copy);
        }

        let mut instance = shell.write();
        for (index, copy) in copies.into_iter().enumerate() {
            instance.set_index(index, copy)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::deep_copy;
    use crate::value::{ClassDef, Instance, TypeHint};

    fn pair_class() -> Arc<ClassDef> {
        ClassDef::builder("Pair")
            .field("left", TypeHint::Any)
            .field("right", TypeHint::Any)
            .constructor(vec![], |class, _| Ok(Instance::new(class)))
            .build()
    }

    #[test]
    fn test_object_is_rebuilt_with_copied_fields() {
        let class = pair_class();
        let left = Value::list(vec![Value::Int(1)]);
        let pair = Instance::new(&class)
            .with("left", left.clone())
            .unwrap()
            .with("right", Value::Int(2))
            .unwrap();
        let original = Value::object(pair);

        let copy = deep_copy(&original).unwrap();
        let obj = copy.as_object().unwrap();
        assert!(Arc::ptr_eq(&obj.class(), &class));
        assert_eq!(obj.get("right"), Some(Value::Int(2)));
        let copied_left = obj.get("left").unwrap();
        assert_eq!(copied_left, left);
        assert!(!copied_left.ptr_eq(&left));
    }

    #[test]
    fn test_self_reference_points_at_copy() {
        let original = Value::object(Instance::new(&pair_class()));
        original
            .as_object()
            .unwrap()
            .set("left", original.clone())
            .unwrap();

        let copy = deep_copy(&original).unwrap();
        let left = copy.as_object().unwrap().get("left").unwrap();
        assert!(left.ptr_eq(&copy));
        assert!(copy.as_object().unwrap().get("right").unwrap().is_null());
    }

    #[test]
    fn test_constructor_defaults_do_not_leak_into_copy() {
        let class = ClassDef::builder("Tagged")
            .field("tag", TypeHint::Str)
            .constructor(vec![], |class, _| {
                Instance::new(class)
                    .with("tag", Value::string("default"))
                    .map_err(Into::into)
            })
            .build();
        let original = Value::object(Instance::new(&class));

        let copy = deep_copy(&original).unwrap();
        assert!(copy.as_object().unwrap().get("tag").unwrap().is_null());
    }

    #[test]
    fn test_constructor_receives_placeholders() {
        let class = ClassDef::builder("Strict")
            .field("name", TypeHint::Str)
            .field("count", TypeHint::Int)
            .constructor(vec![TypeHint::Str, TypeHint::Int], |class, args| {
                anyhow::ensure!(args[0].as_str() == Some(""), "name placeholder");
                anyhow::ensure!(args[1] == Value::Int(0), "count placeholder");
                Ok(Instance::new(class))
            })
            .build();
        let original = Value::object(
            Instance::new(&class)
                .with("name", Value::string("x"))
                .unwrap()
                .with("count", Value::Int(5))
                .unwrap(),
        );

        let copy = deep_copy(&original).unwrap();
        assert_eq!(copy, original);
    }

    #[test]
    fn test_constructor_of_wrong_class_fails() {
        let other = pair_class();
        let class = ClassDef::builder("Liar")
            .constructor(vec![], move |_, _| Ok(Instance::new(&other)))
            .build();
        let err = deep_copy(&Value::object(Instance::new(&class))).unwrap_err();
        assert!(matches!(err, CopyError::Construction { ref class, .. } if class == "Liar"));
    }
}
