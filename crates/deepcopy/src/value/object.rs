//! Class descriptors and instances

use std::fmt;
use std::sync::Arc;

use super::{Handle, TypeHint, Value};
use crate::error::{CopyError, Result};

/// Function pointer type for constructors.
///
/// Receives the class being constructed and one argument per declared
/// parameter.
pub type ConstructorFn =
    Arc<dyn Fn(&Arc<ClassDef>, &[Value]) -> anyhow::Result<Instance> + Send + Sync>;

/// A declared field of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name
    pub name: String,

    /// Declared type
    pub hint: TypeHint,
}

/// A constructor: its parameter types and the function building the instance.
#[derive(Clone)]
pub struct Constructor {
    /// Declared parameter types, in order
    pub params: Vec<TypeHint>,

    /// The actual constructor
    pub func: ConstructorFn,
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constructor({:?})", self.params)
    }
}

/// Runtime type of an object.
///
/// The descriptor is the contract a type signs to take part in deep copies:
/// it lists every field an instance carries and at least one constructor the
/// engine can call to obtain an empty shell.
#[derive(Debug)]
pub struct ClassDef {
    name: String,
    fields: Vec<FieldDef>,
    constructors: Vec<Constructor>,
}

impl ClassDef {
    /// Start describing a class
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            fields: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Declared constructors in declaration order
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// Position of a field by name
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Build an instance through the first declared constructor.
    pub fn instantiate(self: &Arc<Self>, args: &[Value]) -> Result<Instance> {
        let ctor = self
            .constructors
            .first()
            .ok_or_else(|| CopyError::NoConstructor {
                class: self.name.clone(),
            })?;
        (ctor.func)(self, args).map_err(|source| CopyError::Construction {
            class: self.name.clone(),
            source,
        })
    }
}

/// Builder for [`ClassDef`].
pub struct ClassBuilder {
    name: String,
    fields: Vec<FieldDef>,
    constructors: Vec<Constructor>,
}

impl ClassBuilder {
    /// Declare a field
    pub fn field(mut self, name: impl Into<String>, hint: TypeHint) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            hint,
        });
        self
    }

    /// Declare a constructor
    pub fn constructor<F>(mut self, params: Vec<TypeHint>, func: F) -> Self
    where
        F: Fn(&Arc<ClassDef>, &[Value]) -> anyhow::Result<Instance> + Send + Sync + 'static,
    {
        self.constructors.push(Constructor {
            params,
            func: Arc::new(func),
        });
        self
    }

    /// Finish the class
    pub fn build(self) -> Arc<ClassDef> {
        Arc::new(ClassDef {
            name: self.name,
            fields: self.fields,
            constructors: self.constructors,
        })
    }
}

/// An instance of a class: one slot per declared field.
#[derive(Clone)]
pub struct Instance {
    class: Arc<ClassDef>,
    fields: Vec<Value>,
}

impl Instance {
    /// Create an instance with every field at its declared type's zero value
    pub fn new(class: &Arc<ClassDef>) -> Self {
        Self {
            class: Arc::clone(class),
            fields: class.fields.iter().map(|f| f.hint.zero()).collect(),
        }
    }

    /// Set a field (builder pattern)
    pub fn with(mut self, name: &str, value: Value) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// The instance's class
    pub fn class(&self) -> &Arc<ClassDef> {
        &self.class
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.class.field_index(name).map(|i| &self.fields[i])
    }

    /// Get a field by declaration index
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    /// Set a field by name
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let index = self
            .class
            .field_index(name)
            .ok_or_else(|| self.undeclared(name))?;
        self.fields[index] = value;
        Ok(())
    }

    /// Set a field by declaration index
    pub fn set_index(&mut self, index: usize, value: Value) -> Result<()> {
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.undeclared(&index.to_string())),
        }
    }

    /// Field values in declaration order
    pub fn values(&self) -> &[Value] {
        &self.fields
    }

    fn undeclared(&self, field: &str) -> CopyError {
        CopyError::FieldAccess {
            class: self.class.name.clone(),
            field: field.to_string(),
            reason: "no such field is declared".to_string(),
        }
    }
}

// Field values are left out: they may lead back to this instance.
impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl Handle<Instance> {
    /// The object's class
    pub fn class(&self) -> Arc<ClassDef> {
        Arc::clone(&self.read().class)
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name).cloned()
    }

    /// Set a field by name
    pub fn set(&self, name: &str, value: Value) -> Result<()> {
        self.write().set(name, value)
    }

    /// Clone the current field values out of the lock
    pub fn snapshot(&self) -> Vec<Value> {
        self.read().fields.clone()
    }
}
