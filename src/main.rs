use rcontainers::collections::binary_tree::BinaryTreeSet;
use rcontainers::collections::contiguous::DynArray;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("\n[DynArray]\n");

    let mut arr = DynArray::<i32>::with_cap(2);
    println!("{arr:?}");

    for i in [10, 20, 30, 40] {
        arr.push(i);
        println!("{arr:?}");
    }

    println!("{:?}, {arr:?}", arr.pop());
    println!("get(3) = {:?}, get(2) = {:?}", arr.get(3), arr.get(2));
    arr.visit(|i| print!("{i} "));
    println!();

    println!("\n[BinaryTreeSet]\n");

    let mut tree = BinaryTreeSet::new().with_cleanup(|i: i32| info!(i, "released"));
    for i in [5, 3, 8, 1, 4, 3] {
        let linked = tree.insert(i);
        println!("insert({i}) -> {linked}");
    }

    println!("{tree:?}");
    print!("inorder:   ");
    tree.inorder(|i| print!("{i} "));
    print!("\npreorder:  ");
    tree.preorder(|i| print!("{i} "));
    print!("\npostorder: ");
    tree.postorder(|i| print!("{i} "));
    println!("\n{tree}");
}
