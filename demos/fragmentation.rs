use mound::{Heap, SearchMode};

fn main() {
    println!("# first-fit\n");
    let mut heap = Heap::new(SearchMode::FirstFit);

    let p1 = heap.alloc(3).unwrap();
    let p2 = heap.alloc(8).unwrap();
    let p3 = heap.alloc(8).unwrap();
    println!("three allocations:        {heap}");

    heap.free(p3).unwrap();
    heap.free(p2).unwrap();
    println!("freed the last two:       {heap}");

    heap.alloc(16).unwrap();
    println!("the merged block reused:  {heap}");

    let big = heap.alloc(128).unwrap();
    heap.free(big).unwrap();
    heap.alloc(8).unwrap();
    println!("a 128 byte block split:   {heap}");
    let _ = p1;

    println!("\n# best-fit\n");
    let mut heap = Heap::new(SearchMode::BestFit);

    heap.alloc(8).unwrap();
    let z1 = heap.alloc(64).unwrap();
    heap.alloc(8).unwrap();
    let z2 = heap.alloc(16).unwrap();
    println!("mixed sizes:              {heap}");

    heap.free(z2).unwrap();
    heap.free(z1).unwrap();
    heap.alloc(16).unwrap();
    println!("the tight block reused:   {heap}");

    println!("\n# explicit free-list\n");
    let mut heap = Heap::new(SearchMode::FreeList);

    heap.alloc(8).unwrap();
    let v1 = heap.alloc(16).unwrap();
    heap.alloc(8).unwrap();
    heap.free(v1).unwrap();
    println!(
        "one block indexed free:   {heap}   (list length {})",
        heap.free_list_len().unwrap()
    );

    heap.alloc(16).unwrap();
    println!(
        "and found again:          {heap}   (list length {})",
        heap.free_list_len().unwrap()
    );

    println!("\n# segregated-list\n");
    let mut heap = Heap::new(SearchMode::SegregatedList);

    heap.alloc(3).unwrap();
    heap.alloc(8).unwrap();
    heap.alloc(16).unwrap();
    heap.alloc(8).unwrap();
    heap.alloc(32).unwrap();
    println!("bucket by bucket:         {heap}");

    let metrics = heap.metrics();
    println!("\nsession metrics: {metrics:?}");
}
