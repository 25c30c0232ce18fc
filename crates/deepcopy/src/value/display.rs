//! Display and Debug implementations for Value

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::default().write(f, self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is more user-friendly, Debug is more detailed
        match self {
            Value::Str(s) => write!(f, "{}", s), // No quotes for Display
            Value::Char(c) => write!(f, "{}", c),
            _ => fmt::Debug::fmt(self, f),
        }
    }
}

/// Writes a value graph, eliding any node already open on the current path.
#[derive(Default)]
struct Printer {
    path: Vec<Identity>,
}

impl Printer {
    fn write(&mut self, f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
        if let Some(id) = value.identity() {
            if !value.is_string() && self.path.contains(&id) {
                return match value {
                    Value::Object(obj) => write!(f, "{} {{ .. }}", obj.class().name()),
                    _ => write!(f, "[...]"),
                };
            }
        }

        match value {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Str(s) => write!(f, "{:?}", s.as_ref()),

            Value::Array(r) => self.nested(f, r.identity(), |p, f| {
                write!(f, "Array")?;
                p.items(f, "[", &r.snapshot(), "]")
            }),
            Value::List(r) => self.nested(f, r.identity(), |p, f| {
                p.items(f, "[", &r.snapshot(), "]")
            }),
            Value::Set(r) => self.nested(f, r.identity(), |p, f| {
                p.items(f, "{", &r.snapshot(), "}")
            }),
            Value::Deque(r) => self.nested(f, r.identity(), |p, f| {
                write!(f, "Deque")?;
                p.items(f, "[", &r.snapshot(), "]")
            }),
            Value::Collection(r) => self.nested(f, r.identity(), |p, f| {
                write!(f, "{}", r.type_name())?;
                p.items(f, "[", &r.snapshot(), "]")
            }),

            Value::Map(r) => self.nested(f, r.identity(), |p, f| {
                write!(f, "{{")?;
                for (i, (k, v)) in r.snapshot().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    p.write(f, k)?;
                    write!(f, ": ")?;
                    p.write(f, v)?;
                }
                write!(f, "}}")
            }),

            Value::Object(r) => self.nested(f, r.identity(), |p, f| {
                let class = r.class();
                write!(f, "{} {{ ", class.name())?;
                for (i, (def, v)) in class.fields().iter().zip(r.snapshot()).enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", def.name)?;
                    p.write(f, &v)?;
                }
                write!(f, " }}")
            }),
        }
    }

    fn nested(
        &mut self,
        f: &mut fmt::Formatter<'_>,
        id: Identity,
        body: impl FnOnce(&mut Self, &mut fmt::Formatter<'_>) -> fmt::Result,
    ) -> fmt::Result {
        self.path.push(id);
        let result = body(self, f);
        self.path.pop();
        result
    }

    fn items(
        &mut self,
        f: &mut fmt::Formatter<'_>,
        open: &str,
        items: &[Value],
        close: &str,
    ) -> fmt::Result {
        write!(f, "{}", open)?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            self.write(f, item)?;
        }
        write!(f, "{}", close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(format!("{:?}", Value::Null), "null");
        assert_eq!(format!("{:?}", Value::Int(30)), "30");
        assert_eq!(format!("{:?}", Value::Float(1.0)), "1.0");
        assert_eq!(format!("{:?}", Value::string("hi")), "\"hi\"");
        assert_eq!(format!("{}", Value::string("hi")), "hi");
    }

    #[test]
    fn test_containers() {
        let books = Value::list(vec![Value::string("Moby Dick"), Value::string("War and Peace")]);
        assert_eq!(format!("{}", books), "[\"Moby Dick\", \"War and Peace\"]");
        assert_eq!(format!("{:?}", Value::set(vec![Value::Int(1)])), "{1}");
        assert_eq!(
            format!("{:?}", Value::map(vec![(Value::string("k"), Value::Int(1))])),
            "{\"k\": 1}"
        );
        assert_eq!(format!("{:?}", Value::deque(vec![Value::Int(1)])), "Deque[1]");
        assert_eq!(
            format!("{:?}", Value::array(TypeHint::Int, vec![Value::Int(2)])),
            "Array[2]"
        );
    }

    #[test]
    fn test_cycle_is_elided() {
        let list = Value::list(vec![Value::Int(1)]);
        list.as_list().unwrap().push(list.clone());
        assert_eq!(format!("{:?}", list), "[1, [...]]");
    }

    #[test]
    fn test_shared_node_printed_twice() {
        let shared = Value::list(vec![Value::Int(1)]);
        let outer = Value::list(vec![shared.clone(), shared]);
        assert_eq!(format!("{:?}", outer), "[[1], [1]]");
    }
}
