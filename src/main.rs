use balanced_tree::avl_tree::*;
use balanced_tree::Key;
use itertools::Itertools;
use rand::prelude::*;
use rand_pcg::Pcg64;

fn display(tree: &Checked) {
    println!("{}->", tree.iter().join("->"));
}

fn insert_all(tree: &mut Checked, keys: impl IntoIterator<Item = Key>) {
    for key in keys {
        if let Err(e) = tree.insert(key) {
            println!("{}", e);
        }
    }
}

fn remove_all(tree: &mut Checked, keys: impl IntoIterator<Item = Key>) {
    for key in keys {
        if let Err(e) = tree.remove(key) {
            println!("{}", e);
        }
    }
}

fn walkthrough() {
    let mut tree = Checked::new();

    println!("Insertion of an existing key:");
    insert_all(&mut tree, [50, 30, 70, 30]);
    display(&tree);

    println!("\nRandom insertions:");
    insert_all(&mut tree, [45, 80, 20, 60]);
    display(&tree);

    println!("\nSequential insertions:");
    insert_all(&mut tree, 1..=5);
    display(&tree);

    println!("\nRemoval of a missing key:");
    remove_all(&mut tree, [10]);
    display(&tree);

    println!("\nRemoval of leaves:");
    remove_all(&mut tree, [1, 5]);
    display(&tree);

    println!("\nRemoval of a node with one child:");
    remove_all(&mut tree, [3]);
    display(&tree);

    println!("\nRemoval of a node with two children:");
    remove_all(&mut tree, [2]);
    display(&tree);

    println!("\nMixed operations:");
    insert_all(&mut tree, [15]);
    remove_all(&mut tree, [4]);
    display(&tree);

    println!("\nDescending insertions:");
    insert_all(&mut tree, (1..=100).rev());
    display(&tree);
    println!("height {} for {} keys", tree.height(), tree.len());
}

fn stress(seed: u64, rounds: usize) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut tree = Checked::new();
    let (mut inserted, mut removed) = (0, 0);
    for _ in 0..rounds {
        let key = rng.random_range(0..1_000);
        if rng.random_ratio(1, 2) {
            inserted += tree.insert(key).is_ok() as usize;
        } else {
            removed += tree.remove(key).is_ok() as usize;
        }
    }
    println!(
        "\nstress: {} inserted, {} removed, {} left, height {}",
        inserted,
        removed,
        tree.len(),
        tree.height()
    );
}

pub fn main() {
    walkthrough();
    stress(42, 10_000);
}
