//! The walkthrough scenarios
//!
//! Every scenario builds a sample graph, copies it, prints what it observes,
//! and returns the checks it made so callers can tell whether the copy
//! behaved.

use std::fmt;

use anyhow::{Context, Result};
use clap::ValueEnum;
use deepcopy::{DeepCopier, Value};
use log::info;

use crate::models::{add_child, field, man, nested_collection, nested_list, tree_node};

type Step = fn(&DeepCopier) -> Result<Report>;

/// Which scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Copy a flat record and mutate the original
    Simple,
    /// Copy two nodes that point at each other
    Cyclic,
    /// Copy a list and a map of lists and sets
    Nested,
    /// Run all of the above
    All,
}

impl Scenario {
    /// The individual scenarios this selection expands to.
    pub fn expand(self) -> Vec<Scenario> {
        match self {
            Scenario::All => vec![Scenario::Simple, Scenario::Cyclic, Scenario::Nested],
            one => vec![one],
        }
    }

    fn step(self) -> Option<Step> {
        match self {
            Scenario::Simple => Some(simple as Step),
            Scenario::Cyclic => Some(cyclic as Step),
            Scenario::Nested => Some(nested as Step),
            Scenario::All => None,
        }
    }

    /// Run the scenario with the given copier.
    pub fn run(self, copier: &DeepCopier) -> Result<Vec<Report>> {
        self.expand()
            .into_iter()
            .filter_map(Scenario::step)
            .map(|step| step(copier))
            .collect()
    }
}

/// Outcome of one scenario: a title and named checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Heading printed before the scenario runs
    pub title: &'static str,

    /// Each check and whether it held
    pub checks: Vec<(String, bool)>,
}

impl Report {
    fn new(title: &'static str) -> Self {
        println!("\n******* {}\n", title);
        Self {
            title,
            checks: Vec::new(),
        }
    }

    fn check(&mut self, name: &str, passed: bool) {
        println!("{}: {}", name, passed);
        self.checks.push((name.to_string(), passed));
    }

    /// True when every check held.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|(_, ok)| *ok)
    }

    /// Names of the checks that did not hold.
    pub fn failures(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self.checks.iter().filter(|(_, ok)| *ok).count();
        write!(
            f,
            "{}: {}/{} checks passed",
            self.title,
            passed,
            self.checks.len()
        )
    }
}

fn list_len(value: &Value) -> Result<usize> {
    value
        .len()
        .with_context(|| format!("expected a container, found {}", value.type_name()))
}

fn first_child(node: &Value) -> Result<Value> {
    field(node, "children")?
        .as_list()
        .and_then(|children| children.get(0))
        .context("node has no children")
}

/// A record with a list field: the copy's list is not the original's.
pub fn simple(copier: &DeepCopier) -> Result<Report> {
    let mut report = Report::new("DEEP COPY SIMPLE CLASS");

    let original = man("John Doe", 30, &["Moby Dick", "War and Peace"])?;
    println!(
        "Original Man created: {}, Age: {}, Favorite Books: {}",
        field(&original, "name")?,
        field(&original, "age")?,
        field(&original, "favorite_books")?
    );

    let copied = copier.copy(&original)?;
    info!("copied {}", copied.type_name());
    println!(
        "Copied Man details: {}, Age: {}, Favorite Books: {}",
        field(&copied, "name")?,
        field(&copied, "age")?,
        field(&copied, "favorite_books")?
    );

    let original_books = field(&original, "favorite_books")?;
    let copied_books = field(&copied, "favorite_books")?;
    report.check("Objects are distinct", !original.ptr_eq(&copied));
    report.check(
        "Names are equal",
        field(&original, "name")? == field(&copied, "name")?,
    );
    report.check(
        "Ages are equal",
        field(&original, "age")? == field(&copied, "age")?,
    );
    report.check(
        "Favorite book lists are distinct",
        !original_books.ptr_eq(&copied_books),
    );
    report.check("Favorite book lists are equal", original_books == copied_books);

    original_books
        .as_list()
        .context("favorite_books is not a list")?
        .push(Value::string("Pride and Prejudice"));
    println!("Original Man's favorite books: {}", original_books);
    println!("Copied Man's favorite books (unchanged): {}", copied_books);
    report.check(
        "Copied list is unchanged by mutating the original",
        list_len(&copied_books)? == 2,
    );

    Ok(report)
}

/// Two nodes in a cycle: the copy has the same cycle between new nodes.
pub fn cyclic(copier: &DeepCopier) -> Result<Report> {
    let mut report = Report::new("DEEP COPY OF CYCLIC DEPENDENCY");

    let root = tree_node("root")?;
    let child = tree_node("child")?;
    add_child(&root, &child)?;
    add_child(&child, &root)?;
    println!("Created root -> child -> root");

    let copied_root = copier.copy(&root)?;
    let copied_child = first_child(&copied_root)?;
    println!(
        "Root node value: {} | Copied root node value: {}",
        field(&root, "value")?,
        field(&copied_root, "value")?
    );
    println!(
        "Child node value: {} | Copied child node value: {}",
        field(&child, "value")?,
        field(&copied_child, "value")?
    );

    report.check(
        "Values are equal",
        field(&root, "value")? == field(&copied_root, "value")?
            && field(&child, "value")? == field(&copied_child, "value")?,
    );
    report.check(
        "Cyclic dependency preserved in the copy",
        first_child(&copied_child)?.ptr_eq(&copied_root),
    );
    report.check(
        "The copied structure is independent of the original",
        !copied_root.ptr_eq(&root) && !copied_child.ptr_eq(&child),
    );

    // Break both cycles so the nodes can be freed.
    for node in [&child, &copied_child] {
        if let Some(children) = field(node, "children")?.as_list() {
            children.write().clear();
        }
    }

    Ok(report)
}

/// Lists and sets held in a list and in a map.
pub fn nested(copier: &DeepCopier) -> Result<Report> {
    let mut report = Report::new("DEEP COPY OF NESTED COLLECTIONS");

    let original = nested_collection()?;
    let list = field(&original, "collection_list")?;
    let map = field(&original, "collection_map")?;
    let outer = list.as_list().context("collection_list is not a list")?;
    outer.push(Value::from(vec!["One", "Two", "Three"]));
    outer.push(Value::set(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
    let entries = map.as_map().context("collection_map is not a map")?;
    entries.insert("List".into(), Value::from(vec!["A", "B", "C"]));
    entries.insert(
        "Set".into(),
        Value::set(vec![Value::Int(4), Value::Int(5), Value::Int(6)]),
    );

    let copied = copier.copy(&original)?;
    let copied_list = field(&copied, "collection_list")?;
    let copied_map = field(&copied, "collection_map")?;

    report.check("Original and copied objects are distinct", !original.ptr_eq(&copied));
    report.check(
        "Original and copied lists are distinct",
        !list.ptr_eq(&copied_list),
    );
    report.check(
        "Original and copied maps are distinct",
        !map.ptr_eq(&copied_map),
    );
    report.check(
        "Original list content equals copied list content",
        list == copied_list,
    );
    report.check(
        "Original map content equals copied map content",
        map == copied_map,
    );

    outer.push(Value::from(vec!["New Entry"]));
    entries.insert("NewList".into(), Value::from(vec!["X", "Y", "Z"]));
    println!("Original list size: {}", list_len(&list)?);
    println!("Copied list size (should be unchanged): {}", list_len(&copied_list)?);
    println!("Original map size: {}", list_len(&map)?);
    println!("Copied map size (should be unchanged): {}", list_len(&copied_map)?);
    report.check(
        "Copied sizes are unchanged by mutating the original",
        list_len(&copied_list)? == 2 && list_len(&copied_map)? == 2,
    );

    let lists = nested_list()?;
    let shared = Value::from(vec!["shared"]);
    let inner = field(&lists, "list")?;
    let inner = inner.as_list().context("list is not a list")?;
    inner.push(shared.clone());
    inner.push(shared.clone());

    let copied_lists = copier.copy(&lists)?;
    let copied_inner = field(&copied_lists, "list")?;
    let copied_inner = copied_inner.as_list().context("list is not a list")?;
    let held_once = match (copied_inner.get(0), copied_inner.get(1)) {
        (Some(a), Some(b)) => a.ptr_eq(&b) && !a.ptr_eq(&shared),
        _ => false,
    };
    report.check("A list held twice is copied once", held_once);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_expands_in_order() {
        assert_eq!(
            Scenario::All.expand(),
            vec![Scenario::Simple, Scenario::Cyclic, Scenario::Nested]
        );
        assert_eq!(Scenario::Cyclic.expand(), vec![Scenario::Cyclic]);
    }

    #[test]
    fn test_every_scenario_passes() {
        let copier = DeepCopier::new();
        let reports = Scenario::All.run(&copier).unwrap();
        assert_eq!(reports.len(), 3);
        for report in &reports {
            assert!(report.passed(), "{}: {:?}", report, report.failures());
        }
    }

    #[test]
    fn test_report_counts_checks() {
        let mut report = Report::new("COUNTING");
        report.check("yes", true);
        report.check("no", false);
        assert!(!report.passed());
        assert_eq!(report.failures(), vec!["no"]);
        assert_eq!(report.to_string(), "COUNTING: 1/2 checks passed");
    }
}
