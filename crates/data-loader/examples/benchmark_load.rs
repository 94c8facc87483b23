use data_loader::{MovieTable, current_year};
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/indian movies.csv");

    println!("Loading Indian movies dataset...\n");

    let start = Instant::now();
    let table = MovieTable::load_from_file(path, current_year())
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (languages, genres) = table.cardinality();
    let missing_years = table.movies().iter().filter(|m| m.year.is_none()).count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", table.len());
    println!("Languages: {}", languages);
    println!("Genre tags: {}", genres);
    println!("Movies without a year: {}", missing_years);
    println!("\nPerformance: {:.0} rows/second",
             table.len() as f64 / elapsed.as_secs_f64());
}
