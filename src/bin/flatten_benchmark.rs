//! Benchmark flattening of wide and deeply nested children trees

use flatten_children::{Child, Element, Flattener, Fragment};
use std::time::Instant;

/// A list of `width` items where every third slot is a keyed fragment,
/// every fifth a conditional `false` and the rest plain elements
fn wide_tree(width: usize) -> Child {
    Child::list((0..width).map(|i| {
        if i % 5 == 0 {
            Child::Bool(false)
        } else if i % 3 == 0 {
            Fragment::new(Child::List(vec![
                Element::new("li").with_key(format!("a{}", i)).into(),
                Child::text(format!("item {}", i)),
                Element::new("li").into(),
            ]))
            .with_key(format!("group{}", i))
            .into()
        } else {
            Element::new("li").with_children(format!("item {}", i)).into()
        }
    }))
}

/// `depth` fragments nested inside each other, each holding one element
fn deep_tree(depth: usize) -> Child {
    (0..depth).fold(Child::from(Element::new("leaf")), |inner, level| {
        Child::List(vec![
            Element::new("span").with_key(format!("s{}", level)).into(),
            Fragment::new(inner).into(),
        ])
    })
}

fn run(name: &str, tree: &Child, iterations: usize) -> anyhow::Result<()> {
    let flattener = Flattener::default();
    let start = Instant::now();

    let mut total_leaves = 0;
    for _ in 0..iterations {
        total_leaves += flattener.flatten(tree)?.len();
    }

    let duration = start.elapsed();
    println!("=== {} ===", name);
    println!("Time: {:?}", duration);
    println!("Leaves per call: {}", total_leaves / iterations);
    println!(
        "Average per call: {:.2}μs\n",
        duration.as_micros() as f64 / iterations as f64
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    println!("=== Children Flattening Benchmark ===\n");

    run("Wide tree (1000 slots)", &wide_tree(1000), 1000)?;
    run("Wide tree (100000 slots)", &wide_tree(100_000), 10)?;
    run("Deep tree (200 fragments)", &deep_tree(200), 1000)?;

    Ok(())
}
