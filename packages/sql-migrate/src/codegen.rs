use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, MigrateResult};

const GENERATED_FILE: &str = "migrations_gen.rs";

/// Discovers `.sql` files for inclusion at compile time. Call from `build.rs`.
///
/// Scans `<CARGO_MANIFEST_DIR>/<migrations_dir_name>` (default `migrations`) and
/// writes `migrations_gen.rs` into `OUT_DIR`. A missing directory produces an
/// empty migration list.
///
/// # Example
/// ```no_run
/// // build.rs
/// fn main() {
///     sql_migrate::list(Some("migrations")).unwrap();
/// }
/// ```
pub fn list(migrations_dir_name: Option<&str>) -> MigrateResult<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| Error::EnvVarNotFound("CARGO_MANIFEST_DIR".to_string()))?;
    let out_dir =
        env::var("OUT_DIR").map_err(|_| Error::EnvVarNotFound("OUT_DIR".to_string()))?;

    let migrations_dir =
        Path::new(&manifest_dir).join(migrations_dir_name.unwrap_or("migrations"));

    println!("cargo:rerun-if-changed={}", migrations_dir.display());

    write_migrations(&migrations_dir, &Path::new(&out_dir).join(GENERATED_FILE))
}

fn write_migrations(migrations_dir: &Path, dest_path: &Path) -> MigrateResult<()> {
    let files = if migrations_dir.exists() {
        collect_migration_files(migrations_dir)?
    } else {
        Vec::new()
    };

    fs::write(dest_path, generate_migrations_code(&files))?;
    Ok(())
}

/// Returns `(id, absolute path)` pairs for every `.sql` file, sorted by id.
fn collect_migration_files(migrations_dir: &Path) -> MigrateResult<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(migrations_dir)? {
        let path = entry?.path();

        if path.extension().and_then(|s| s.to_str()) != Some("sql") {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            println!("cargo:rerun-if-changed={}", path.display());
            let absolute = fs::canonicalize(&path)?;
            files.push((stem.to_string(), absolute));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(files)
}

fn generate_migrations_code(files: &[(String, PathBuf)]) -> String {
    let mut code = String::from("&[\n");

    for (id, path) in files {
        // Debug formatting escapes backslashes and quotes in the path.
        code.push_str(&format!(
            "    ::sql_migrate::Migration::new({id:?}, ::core::include_str!({:?})),\n",
            path.to_string_lossy()
        ));
    }

    code.push_str("]\n");
    code
}
