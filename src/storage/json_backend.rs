use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use super::book::{BudgetBook, ObligationBook};
use super::Result;

const TMP_SUFFIX: &str = "tmp";

pub fn save_budget_book(book: &BudgetBook, path: &Path) -> Result<()> {
    save_json(book, path)
}

pub fn load_budget_book(path: &Path) -> Result<BudgetBook> {
    load_json(path)
}

pub fn save_obligation_book(book: &ObligationBook, path: &Path) -> Result<()> {
    save_json(book, path)
}

pub fn load_obligation_book(path: &Path) -> Result<ObligationBook> {
    load_json(path)
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
