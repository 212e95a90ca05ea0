use std::env;
use std::error::Error;
use std::time::{Duration, Instant};
use log::{error, LevelFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use mt_bucket_sort::{advise_thread_count, bucket_sort, first_unsorted, hardware_threads};

const DEFAULT_SIZE: usize = 4_000_000;
const DEFAULT_MAX_BUCKETS: usize = 1024;
const DEFAULT_SEED: u64 = 0;

fn generate(seed: u64, len: usize) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<u32>()).collect()
}

fn run(name: &str, arr: &mut [u32], buckets: usize, threads: usize) -> Result<Duration, Box<dyn Error>> {
    println!(
        "\nStarting bucket sort for listSize = {}, numBuckets = {}, numThreads = {}, number of cores = {}",
        arr.len(),
        buckets,
        threads,
        hardware_threads()
    );
    let start = Instant::now();
    bucket_sort(arr, buckets, threads)?;
    let duration = start.elapsed();

    if let Some(i) = first_unsorted(arr) {
        error!(
            "SORT TEST {} failed: arr[{}] = {:08x} > arr[{}] = {:08x}",
            name,
            i,
            arr[i],
            i + 1,
            arr[i + 1]
        );
        return Err(format!("{} was not sorted correctly at index {}", name, i).into());
    }
    println!("PASSED SORT TEST {} in {:?}", name, duration);
    Ok(duration)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let mut args = env::args();
    args.next();

    let size = match args.next() {
        Some(arg) => arg.parse::<usize>()?,
        None => DEFAULT_SIZE,
    };
    let max_buckets = match args.next() {
        Some(arg) => arg.parse::<usize>()?,
        None => DEFAULT_MAX_BUCKETS,
    };
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => {
            eprintln!("No seed specified. Using {}", DEFAULT_SEED);
            DEFAULT_SEED
        }
    };

    // Small runs; set RUST_LOG=trace to see the buckets.
    for buckets in [2, 4] {
        let mut arr = generate(seed, 100);
        run(&format!("{} buckets", buckets), &mut arr, buckets, advise_thread_count(buckets))?;
    }

    let mut arr = generate(seed, size);
    let baseline = run("1 bucket with 1 thread - BASELINE", &mut arr, 1, 1)?;

    let mut best_single: Option<(usize, Duration)> = None;
    let mut best_multi: Option<(usize, Duration)> = None;

    for multi_threaded in [false, true] {
        let mut buckets = 2;
        while buckets <= max_buckets {
            let threads = if multi_threaded { advise_thread_count(buckets) } else { 1 };
            let mut arr = generate(seed, size);
            let duration = run(&format!("{} items in {} buckets", size, buckets), &mut arr, buckets, threads)?;

            let best = if multi_threaded { &mut best_multi } else { &mut best_single };
            if best.map_or(true, |(_, d)| duration < d) {
                *best = Some((buckets, duration));
            }
            buckets *= 2;
        }
    }

    println!("\n-----------------------------------------------------------");
    println!("              FINAL RESULTS");
    println!("The baseline (quicksort on 1 thread/1 bucket): completed in {:?}", baseline);
    if let Some((buckets, d)) = best_single {
        println!("The best singlethreaded result: {} buckets completed in {:?}", buckets, d);
    }
    if let Some((buckets, d)) = best_multi {
        println!("The best multithreaded result:  {} buckets completed in {:?}", buckets, d);
    }
    println!("-----------------------------------------------------------");

    Ok(())
}
