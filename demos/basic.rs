use spacesaving::StreamSummary;

fn main() {
    // Create a new StreamSummary that monitors at most 3 distinct items.
    // Items beyond that replace the least frequent one and inherit its
    // count as their error bound.
    let mut summary: StreamSummary<String> = StreamSummary::new(3).expect("capacity is positive");

    let text = "to be or not to be that is the question to be";
    for word in text.split_whitespace() {
        summary.add(word.to_string());
    }

    // Print the items in order of estimated frequency
    println!("Monitored items and their frequencies:");
    for element in summary.sorted_frequencies() {
        println!("{}: {} (error {})", element.item, element.count, element.error);
    }

    // Items whose rank is certain despite the error bounds
    println!("\nGuaranteed top items:");
    for element in summary.most_frequents() {
        println!("{}: at least {}", element.item, element.guaranteed());
    }

    // Demonstrate the count() method
    let item = "to";
    match summary.count(item) {
        Some(count) => println!("\nCount for '{}': {}", item, count),
        None => println!("\n'{}' is not monitored", item),
    }

    // Demonstrate the contains() method
    println!("Is 'question' monitored? {}",
        if summary.contains("question") { "yes" } else { "no" });
}
