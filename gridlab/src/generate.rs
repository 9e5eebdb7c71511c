//! Instance generation for `gridlab gen`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rand::RngCore;
use tracing::{debug, info, instrument};

use crate::core::generator::{GeneratorParams, generate};
use crate::io::instance_store::{instance_path, write_instance};

/// Generate the instance for `seed` and write it to `<out_dir>/input_<seed>.txt`.
#[instrument(skip(params))]
pub fn gen_once(out_dir: &Path, seed: u32, params: &GeneratorParams) -> Result<PathBuf> {
    let instance = generate(seed, params).with_context(|| format!("generate seed {seed}"))?;
    let path = instance_path(out_dir, seed);
    write_instance(&path, &instance)?;
    debug!(seed, n = instance.n(), path = %path.display(), "instance written");
    Ok(path)
}

/// Generate one instance per seed listed in `seed_file`.
pub fn gen_list(out_dir: &Path, seed_file: &Path, params: &GeneratorParams) -> Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(seed_file)
        .with_context(|| format!("read seed list {}", seed_file.display()))?;
    let seeds =
        parse_seed_list(&contents).with_context(|| format!("parse {}", seed_file.display()))?;
    info!(count = seeds.len(), "generating listed seeds");
    seeds
        .into_iter()
        .map(|seed| gen_once(out_dir, seed, params))
        .collect()
}

/// Generate `count` instances with seeds drawn from `rng`.
pub fn gen_random<R: RngCore>(
    out_dir: &Path,
    count: u32,
    params: &GeneratorParams,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    info!(count, "generating random seeds");
    (0..count)
        .map(|_| gen_once(out_dir, rng.next_u32(), params))
        .collect()
}

/// One seed per line; blank lines are skipped.
pub fn parse_seed_list(contents: &str) -> Result<Vec<u32>> {
    let mut seeds = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<u32>() {
            Ok(seed) => seeds.push(seed),
            Err(err) => bail!("line {}: invalid seed '{}': {}", index + 1, line, err),
        }
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mt::Mt19937;
    use crate::core::serializer::serialize;
    use crate::io::instance_store::read_instance;

    fn small() -> GeneratorParams {
        GeneratorParams {
            min_size: 4,
            max_size: 6,
            op_count: 8,
        }
    }

    #[test]
    fn gen_once_writes_seed_named_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = gen_once(temp.path(), 17, &small()).expect("gen");
        assert_eq!(path, temp.path().join("input_17.txt"));

        let written = fs::read_to_string(&path).expect("read");
        let expected = serialize(&generate(17, &small()).expect("generate"));
        assert_eq!(written, expected);
    }

    #[test]
    fn gen_list_reads_seed_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let seed_file = temp.path().join("seeds.txt");
        fs::write(&seed_file, "3\n\n 5 \n").expect("write seeds");
        let out = temp.path().join("inputs");

        let paths = gen_list(&out, &seed_file, &small()).expect("gen list");
        assert_eq!(paths, vec![out.join("input_3.txt"), out.join("input_5.txt")]);
        assert_eq!(read_instance(&paths[1]).expect("read").catalog().len(), 8);
    }

    #[test]
    fn gen_random_is_reproducible_with_seeded_rng() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = gen_random(temp.path(), 3, &small(), &mut Mt19937::new(1)).expect("gen");
        let mut rng = Mt19937::new(1);
        let expected: Vec<PathBuf> = (0..3)
            .map(|_| instance_path(temp.path(), rng.next_u32()))
            .collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn parse_seed_list_reports_bad_line() {
        let err = parse_seed_list("1\nabc\n").expect_err("bad seed");
        assert!(err.to_string().contains("line 2"));
        assert!(parse_seed_list("-4").is_err());
    }
}
