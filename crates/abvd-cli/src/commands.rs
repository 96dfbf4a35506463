use std::fs;
use std::path::{Path, PathBuf};

use abvd_core::cognate::audit;
use abvd_core::config::DEFAULT_START_ID;
use abvd_core::document::{parse_document, wrap_fragment};
use abvd_core::{
    Collection, Config, DownloadError, Downloader, FileStorage, LexiconDatabase, Storage,
};
use color_eyre::eyre::{Result, WrapErr};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .wrap_err_with(|| format!("failed to write {}", path.display())),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

pub async fn download(
    config: &Config,
    collection: Collection,
    language: u32,
    output: Option<PathBuf>,
    raw: bool,
) -> Result<()> {
    let downloader = Downloader::from_config(collection, &config.download)?;

    let content = if raw {
        let body = downloader.fetch_raw(language).await?;
        wrap_fragment(&body).into_owned()
    } else {
        let document = downloader.get(language).await?;
        serde_json::to_string_pretty(&document)?
    };

    emit(&content, output.as_deref())
}

pub async fn fetch(
    config: &Config,
    collection: Collection,
    start: Option<u32>,
    stop: Option<u32>,
    concurrency: Option<usize>,
) -> Result<()> {
    let downloader = Downloader::from_config(collection, &config.download)?;
    let storage = FileStorage::with_config(config.storage.clone());

    let start = start.unwrap_or(DEFAULT_START_ID);
    let stop = stop.unwrap_or(config.download.max_language_id);
    let concurrency = concurrency.unwrap_or(config.download.concurrency);

    let existing = storage.list_downloaded(collection)?;
    let ids: Vec<u32> = (start..stop)
        .filter(|id| !existing.contains(id) && !collection.is_dead(*id))
        .collect();

    info!(
        %collection,
        pending = ids.len(),
        skipped = (stop.saturating_sub(start) as usize).saturating_sub(ids.len()),
        "fetching languages"
    );

    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?.progress_chars("=> "),
    );

    let mut saved = 0usize;
    let mut stream = Box::pin(downloader.fetch_stream(ids, concurrency));
    while let Some((id, result)) = stream.next().await {
        pb.set_message(format!("{}", id));
        match result {
            Ok(xml) => {
                let path = storage.save_raw(collection, id, &xml)?;
                match parse_document(&xml) {
                    Ok(document) => {
                        storage.save_document(collection, id, &document)?;
                    }
                    Err(e) => warn!(language_id = id, error = %e, "stored raw export only"),
                }
                pb.println(format!("{}: saved {}", id, path.display()));
                saved += 1;
            }
            Err(DownloadError::InvalidLanguage(_)) => {
                pb.println(format!("{}: no such language", id));
            }
            Err(e) => {
                warn!(language_id = id, error = %e, "download failed");
                pb.println(format!("{}: {}", id, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    info!(%collection, saved, "fetch complete");
    Ok(())
}

fn load_database(config: &Config, files: &[PathBuf]) -> Result<LexiconDatabase> {
    let mut db = LexiconDatabase::with_options(config.cognates);
    for file in files {
        db.load(file)
            .wrap_err_with(|| format!("failed to load {}", file.display()))?;
    }
    Ok(db)
}

pub fn details(config: &Config, files: &[PathBuf], output: &Path) -> Result<()> {
    let aggregation = load_database(config, files)?.process()?;
    aggregation.save_details(output)?;
    info!(
        languages = aggregation.summaries().len(),
        output = %output.display(),
        "wrote details"
    );
    Ok(())
}

pub fn records(config: &Config, files: &[PathBuf], output: Option<PathBuf>) -> Result<()> {
    let aggregation = load_database(config, files)?.process()?;
    let json = serde_json::to_string_pretty(aggregation.records())?;
    emit(&json, output.as_deref())
}

pub fn check_cognates(files: &[PathBuf]) -> Result<()> {
    let mut values = Vec::new();
    for file in files {
        let content = fs::read_to_string(file)
            .wrap_err_with(|| format!("failed to read {}", file.display()))?;
        values.extend(content.lines().map(str::to_string));
    }

    let report = audit(&values);
    for failure in &report.failures {
        println!(
            "{:?}\tstrict: {:?}\tlenient: {:?}",
            failure.value, failure.strict, failure.lenient
        );
    }
    println!(
        "{}/{} ({:.2}%) good",
        report.good,
        report.checked,
        report.percentage()
    );
    Ok(())
}
