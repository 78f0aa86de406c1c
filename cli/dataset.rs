/*!
This module reorganizes a four class brain MRI dataset into the binary layout used for training and evaluation.

The source directory contains `Training` and `Testing`, each with one directory per class: `glioma`, `meningioma`, `pituitary`, and `notumor`. The destination receives `train` and `test`, each with `tumor` and `no_tumor`. Every tumor class is merged into `tumor`.
*/

use anyhow::{format_err, Context, Result};
use std::path::Path;

const TUMOR_CLASSES: &[&str] = &["glioma", "meningioma", "pituitary"];
const NO_TUMOR_CLASS: &str = "notumor";

/// (destination split, source split)
const SPLITS: &[(&str, &str)] = &[("train", "Training"), ("test", "Testing")];

#[derive(Debug, PartialEq)]
pub struct CopiedClass {
	pub split: &'static str,
	pub source_class: &'static str,
	pub target_class: &'static str,
	pub n_files: usize,
}

pub fn reorganize(source: &Path, dest: &Path) -> Result<Vec<CopiedClass>> {
	let mut copied = Vec::new();
	for &(split, source_split) in SPLITS.iter() {
		for target_class in ["tumor", "no_tumor"].iter() {
			let dir = dest.join(split).join(target_class);
			std::fs::create_dir_all(&dir)
				.with_context(|| format!("failed to create directory {}", dir.display()))?;
		}
		let classes = TUMOR_CLASSES
			.iter()
			.map(|class| (*class, "tumor"))
			.chain(std::iter::once((NO_TUMOR_CLASS, "no_tumor")));
		for (source_class, target_class) in classes {
			let source_dir = source.join(source_split).join(source_class);
			let target_dir = dest.join(split).join(target_class);
			let n_files = copy_files(&source_dir, &target_dir)?;
			log::info!(
				"copied {} files from {} to {}",
				n_files,
				source_dir.display(),
				target_dir.display()
			);
			copied.push(CopiedClass {
				split,
				source_class,
				target_class,
				n_files,
			});
		}
	}
	Ok(copied)
}

/// Copy every regular file directly inside `source_dir` into `target_dir`, keeping file names. Returns the number of files copied.
fn copy_files(source_dir: &Path, target_dir: &Path) -> Result<usize> {
	if !source_dir.is_dir() {
		return Err(format_err!(
			"class directory {} does not exist",
			source_dir.display()
		));
	}
	let entries = std::fs::read_dir(source_dir)
		.with_context(|| format!("failed to read directory {}", source_dir.display()))?;
	let mut n_files = 0;
	for entry in entries {
		let entry = entry?;
		if !entry.file_type()?.is_file() {
			continue;
		}
		let source_path = entry.path();
		let target_path = target_dir.join(entry.file_name());
		std::fs::copy(&source_path, &target_path).with_context(|| {
			format!(
				"failed to copy {} to {}",
				source_path.display(),
				target_path.display()
			)
		})?;
		n_files += 1;
	}
	Ok(n_files)
}

#[cfg(test)]
fn write_images(dir: &Path, names: &[&str]) {
	std::fs::create_dir_all(dir).unwrap();
	for name in names {
		std::fs::write(dir.join(name), name.as_bytes()).unwrap();
	}
}

#[test]
fn test_reorganize() {
	let source = tempfile::tempdir().unwrap();
	let dest = tempfile::tempdir().unwrap();
	for split in ["Training", "Testing"].iter() {
		let split_dir = source.path().join(split);
		write_images(&split_dir.join("glioma"), &["gl_1.jpg", "gl_2.jpg"]);
		write_images(&split_dir.join("meningioma"), &["me_1.jpg"]);
		write_images(&split_dir.join("pituitary"), &["pi_1.jpg"]);
		write_images(&split_dir.join("notumor"), &["no_1.jpg", "no_2.jpg", "no_3.jpg"]);
	}
	// nested directories are skipped
	std::fs::create_dir_all(source.path().join("Training/glioma/nested")).unwrap();
	let copied = reorganize(source.path(), dest.path()).unwrap();
	let counts: Vec<(&str, &str, usize)> = copied
		.iter()
		.map(|class| (class.split, class.source_class, class.n_files))
		.collect();
	assert_eq!(
		counts,
		vec![
			("train", "glioma", 2),
			("train", "meningioma", 1),
			("train", "pituitary", 1),
			("train", "notumor", 3),
			("test", "glioma", 2),
			("test", "meningioma", 1),
			("test", "pituitary", 1),
			("test", "notumor", 3),
		]
	);
	for split in ["train", "test"].iter() {
		let tumor = std::fs::read_dir(dest.path().join(split).join("tumor")).unwrap();
		assert_eq!(tumor.count(), 4);
		let no_tumor = std::fs::read_dir(dest.path().join(split).join("no_tumor")).unwrap();
		assert_eq!(no_tumor.count(), 3);
	}
	let copied_file = std::fs::read(dest.path().join("test/tumor/me_1.jpg")).unwrap();
	assert_eq!(copied_file, b"me_1.jpg");
}

#[test]
fn test_reorganize_missing_class() {
	let source = tempfile::tempdir().unwrap();
	let dest = tempfile::tempdir().unwrap();
	write_images(&source.path().join("Training/glioma"), &["gl_1.jpg"]);
	let error = reorganize(source.path(), dest.path()).unwrap_err();
	assert!(error.to_string().contains("meningioma"));
}
