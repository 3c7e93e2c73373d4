use super::{OutputError, TripVariantRow, VariantStopRow};
use csv::QuoteStyle;
use dirsplit_core::{engine::RunReport, model::TripVariant};
use flate2::{write::GzEncoder, Compression};
use std::{fs::File, path::Path};

pub const VARIANTS_FILENAME: &str = "trip-variants.csv.gz";
pub const VARIANT_STOPS_FILENAME: &str = "trip-variant-stops.csv.gz";
pub const RUN_SUMMARY_FILENAME: &str = "run-summary.json";

/// writes the variants and their stops into the two csv.gz files of the output directory.
/// returns the number of variants written.
pub fn write_variants<'a>(
    directory: &Path,
    variants: impl Iterator<Item = &'a TripVariant>,
    overwrite: bool,
) -> Result<usize, OutputError> {
    create_directory(directory)?;
    let mut variants_writer =
        create_writer(directory, VARIANTS_FILENAME, true, QuoteStyle::Necessary, overwrite)?;
    let mut stops_writer = create_writer(
        directory,
        VARIANT_STOPS_FILENAME,
        true,
        QuoteStyle::Necessary,
        overwrite,
    )?;

    let mut n_variants = 0;
    for variant in variants {
        variants_writer
            .serialize(TripVariantRow::from(variant))
            .map_err(|source| OutputError::WriteRowError {
                filename: String::from(VARIANTS_FILENAME),
                source,
            })?;
        for row in VariantStopRow::rows(variant) {
            stops_writer
                .serialize(row)
                .map_err(|source| OutputError::WriteRowError {
                    filename: String::from(VARIANT_STOPS_FILENAME),
                    source,
                })?;
        }
        n_variants += 1;
    }

    finish_writer(variants_writer, VARIANTS_FILENAME)?;
    finish_writer(stops_writer, VARIANT_STOPS_FILENAME)?;
    log::info!(
        "wrote {n_variants} trip variants to {}",
        directory.join(VARIANTS_FILENAME).display()
    );
    Ok(n_variants)
}

/// deletes trip variant files left in the output directory by an earlier run.
pub fn remove_variants(directory: &Path) -> Result<(), OutputError> {
    for filename in [VARIANTS_FILENAME, VARIANT_STOPS_FILENAME] {
        let filepath = directory.join(filename);
        if filepath.exists() {
            std::fs::remove_file(&filepath).map_err(|source| OutputError::RemoveFileError {
                filename: filepath.display().to_string(),
                source,
            })?;
            log::info!("removed stale {}", filepath.display());
        }
    }
    Ok(())
}

/// writes the run report as pretty-printed JSON.
pub fn write_run_summary(
    directory: &Path,
    report: &RunReport,
    overwrite: bool,
) -> Result<(), OutputError> {
    create_directory(directory)?;
    let filepath = directory.join(RUN_SUMMARY_FILENAME);
    if filepath.exists() && !overwrite {
        return Err(OutputError::FileExists(filepath.display().to_string()));
    }
    let file = File::create(&filepath).map_err(|source| OutputError::CreateFileError {
        filename: filepath.display().to_string(),
        source,
    })?;
    serde_json::to_writer_pretty(file, report).map_err(|source| OutputError::SummaryError {
        filename: filepath.display().to_string(),
        source,
    })?;
    log::info!("wrote run summary to {}", filepath.display());
    Ok(())
}

fn create_directory(directory: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(directory).map_err(|source| OutputError::CreateDirectoryError {
        directory: directory.display().to_string(),
        source,
    })
}

/// helper function to build a filewriter for writing .csv.gz files while
/// respecting the user's overwrite preferences.
fn create_writer(
    directory: &Path,
    filename: &str,
    has_headers: bool,
    quote_style: QuoteStyle,
    overwrite: bool,
) -> Result<csv::Writer<GzEncoder<File>>, OutputError> {
    let filepath = directory.join(filename);
    if filepath.exists() && !overwrite {
        return Err(OutputError::FileExists(filepath.display().to_string()));
    }
    let file = File::create(&filepath).map_err(|source| OutputError::CreateFileError {
        filename: filepath.display().to_string(),
        source,
    })?;
    let buffer = GzEncoder::new(file, Compression::default());
    let writer = csv::WriterBuilder::new()
        .has_headers(has_headers)
        .quote_style(quote_style)
        .from_writer(buffer);
    Ok(writer)
}

/// flushes the csv buffer and writes the gzip trailer.
fn finish_writer(writer: csv::Writer<GzEncoder<File>>, filename: &str) -> Result<(), OutputError> {
    let encoder = writer
        .into_inner()
        .map_err(|e| OutputError::FinishError {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;
    encoder.finish().map_err(|e| OutputError::FinishError {
        filename: filename.to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirsplit_core::model::{CanonicalPosition, ClassifiedStop, RawTripStop};
    use flate2::read::GzDecoder;

    fn variant(trip_id: &str, stop_ids: &[&str]) -> TripVariant {
        let stops = stop_ids
            .iter()
            .enumerate()
            .map(|(idx, stop_id)| {
                ClassifiedStop::new(
                    RawTripStop {
                        trip_id: trip_id.to_string(),
                        stop_id: stop_id.to_string(),
                        gtfs_sequence: idx as u32 + 1,
                    },
                    "north",
                    CanonicalPosition::exact(idx),
                )
            })
            .collect();
        TripVariant {
            route_id: String::from("3"),
            direction_id: String::from("north"),
            headsign_label: String::from("Milton Go"),
            source_trip_id: trip_id.to_string(),
            leg: 0,
            stops,
        }
    }

    fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
        let file = File::open(path).expect("output file exists");
        csv::Reader::from_reader(GzDecoder::new(file))
            .into_deserialize::<T>()
            .collect::<Result<Vec<_>, _>>()
            .expect("valid rows")
    }

    #[test]
    fn test_write_variants_and_respect_overwrite() {
        let directory = std::env::temp_dir().join("dirsplit_test_write_variants");
        let _ = std::fs::remove_dir_all(&directory);
        let variants = [
            variant("t1", &["2286", "2287", "2295"]),
            variant("t2", &["2286", "2287"]),
        ];

        let written = write_variants(&directory, variants.iter(), false).expect("written");
        assert_eq!(written, 2);

        let variant_rows: Vec<TripVariantRow> = read_rows(&directory.join(VARIANTS_FILENAME));
        assert_eq!(variant_rows.len(), 2);
        assert_eq!(variant_rows[0].variant_id, "t1:0");
        assert_eq!(variant_rows[0].stop_count, 3);
        let stop_rows: Vec<VariantStopRow> = read_rows(&directory.join(VARIANT_STOPS_FILENAME));
        assert_eq!(stop_rows.len(), 5);
        assert_eq!(stop_rows[4].variant_id, "t2:0");
        assert_eq!(stop_rows[4].stop_id, "2287");

        let again = write_variants(&directory, variants.iter(), false);
        assert!(matches!(again, Err(OutputError::FileExists(_))));
        let overwritten = write_variants(&directory, variants[..1].iter(), true).expect("written");
        assert_eq!(overwritten, 1);

        let _ = std::fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_remove_variants() {
        let directory = std::env::temp_dir().join("dirsplit_test_remove_variants");
        let _ = std::fs::remove_dir_all(&directory);
        remove_variants(&directory).expect("nothing to remove");
        write_variants(&directory, [variant("t1", &["2286"])].iter(), false).expect("written");
        remove_variants(&directory).expect("removed");
        assert!(!directory.join(VARIANTS_FILENAME).exists());
        assert!(!directory.join(VARIANT_STOPS_FILENAME).exists());
        let _ = std::fs::remove_dir_all(&directory);
    }

    #[test]
    fn test_write_run_summary() {
        let directory = std::env::temp_dir().join("dirsplit_test_run_summary");
        let _ = std::fs::remove_dir_all(&directory);
        let report = RunReport {
            routes: 2,
            trips: 10,
            ..Default::default()
        };
        write_run_summary(&directory, &report, false).expect("written");
        let text = std::fs::read_to_string(directory.join(RUN_SUMMARY_FILENAME)).expect("read");
        let json: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(json["routes"], 2);
        assert_eq!(json["trips"], 10);
        assert!(json["classification_failures"].as_array().is_some_and(|a| a.is_empty()));
        let _ = std::fs::remove_dir_all(&directory);
    }
}
