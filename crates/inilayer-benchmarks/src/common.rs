//! Common utilities for benchmarks

use camino::Utf8PathBuf;
use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};
use tempfile::TempDir;

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// INI text with `keys` entries in each of the ten typed sections.
///
/// `seed` shifts every value so that two layers built with different seeds
/// override each other on every key.
pub fn typed_ini_content(keys: usize, seed: usize) -> String {
    let mut content = String::new();

    content.push_str("[sectionString]\n");
    for i in 0..keys {
        content.push_str(&format!("NAME_{} = value-{}-{}\n", i, i, seed));
    }
    content.push_str("\n[sectionBool]\n");
    for i in 0..keys {
        content.push_str(&format!("FLAG_{} = {}\n", i, (i + seed) % 2 == 0));
    }
    content.push_str("\n[sectionInt]\n");
    for i in 0..keys {
        content.push_str(&format!("PORT_{} = {}\n", i, 8000 + i + seed));
    }
    content.push_str("\n[sectionInt64]\n");
    for i in 0..keys {
        content.push_str(&format!("OFFSET_{} = -{}\n", i, (i + seed) * 1_000_003));
    }
    content.push_str("\n[sectionUint]\n");
    for i in 0..keys {
        content.push_str(&format!("WORKERS_{} = {}\n", i, i + seed));
    }
    content.push_str("\n[sectionUint64]\n");
    for i in 0..keys {
        content.push_str(&format!("BYTES_{} = {}\n", i, (i + seed) as u64 * 4_294_967_311));
    }
    content.push_str("\n[sectionFloat32]\n");
    for i in 0..keys {
        content.push_str(&format!("RATIO_{} = {}.5\n", i, i + seed));
    }
    content.push_str("\n[sectionFloat64]\n");
    for i in 0..keys {
        content.push_str(&format!("SCALE_{} = {}.125\n", i, i + seed));
    }
    content.push_str("\n[sectionStringList]\n");
    for i in 0..keys {
        content.push_str(&format!("HOSTS_{} = [a{}, b{}, c{}]\n", i, seed, i, seed));
    }
    content.push_str("\n[sectionIntList]\n");
    for i in 0..keys {
        content.push_str(&format!("RETRIES_{} = [{}, {}, {}]\n", i, i, seed, i + seed));
    }

    content
}

/// Write `layers` files of [`typed_ini_content`] into a fresh temp directory.
///
/// Paths come back in override order; keep the `TempDir` alive while they are used.
pub fn write_layers(layers: usize, keys: usize) -> (TempDir, Vec<Utf8PathBuf>) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf())
        .expect("Temp directory path is not UTF-8");

    let paths = (0..layers)
        .map(|layer| {
            let path = dir.join(format!("layer-{}.conf", layer));
            std::fs::write(&path, typed_ini_content(keys, layer))
                .expect("Failed to write benchmark layer");
            path
        })
        .collect();

    (temp_dir, paths)
}
