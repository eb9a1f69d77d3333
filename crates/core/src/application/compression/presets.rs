// Common qzip job shapes

use std::path::PathBuf;

use crate::domain::JobSpec;

/// Compress one file to an explicit output path, keeping the source
pub fn compress_with_output(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> JobSpec {
    JobSpec {
        output: Some(output.into()),
        ..JobSpec::compress([input])
    }
}

/// Compress every file directly under `dir` separately, keeping the sources
pub fn compress_directory(dir: impl Into<PathBuf>) -> JobSpec {
    JobSpec {
        directory: true,
        ..JobSpec::compress([dir])
    }
}

pub fn compress_files<I, P>(inputs: I) -> JobSpec
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    JobSpec::compress(inputs)
}

pub fn compress_directory_busy_poll(dir: impl Into<PathBuf>) -> JobSpec {
    JobSpec {
        busy_poll: true,
        ..compress_directory(dir)
    }
}

/// Decompress one file to an explicit output path, keeping the source
pub fn decompress_with_output(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> JobSpec {
    JobSpec {
        output: Some(output.into()),
        ..JobSpec::decompress([input])
    }
}

/// Decompress every file under `dir`, removing the compressed sources
pub fn decompress_directory(dir: impl Into<PathBuf>) -> JobSpec {
    JobSpec {
        directory: true,
        recursive: true,
        keep_source: false,
        ..JobSpec::decompress([dir])
    }
}

/// Decompress files in place, removing the compressed sources
pub fn decompress_files<I, P>(inputs: I) -> JobSpec
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    JobSpec {
        keep_source: false,
        ..JobSpec::decompress(inputs)
    }
}

pub fn decompress_directory_busy_poll(dir: impl Into<PathBuf>) -> JobSpec {
    JobSpec {
        busy_poll: true,
        ..decompress_directory(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::option_builder::OptionBuilder;

    fn argv(spec: &JobSpec) -> Vec<String> {
        OptionBuilder::build(spec).unwrap().into_vec()
    }

    #[test]
    fn test_compress_presets() {
        assert_eq!(
            argv(&compress_with_output("/d/a.txt", "/d/a.gz")),
            vec!["-k", "-o", "/d/a.gz", "/d/a.txt"]
        );
        assert_eq!(argv(&compress_directory("/d")), vec!["-k", "/d"]);
        assert_eq!(
            argv(&compress_directory_busy_poll("/d")),
            vec!["-k", "-P", "busy", "/d"]
        );
        assert_eq!(argv(&compress_files(["/x", "/y"])), vec!["-k", "/x", "/y"]);
    }

    #[test]
    fn test_decompress_presets() {
        assert_eq!(
            argv(&decompress_with_output("/d/a.gz", "/d/a.txt")),
            vec!["-d", "-k", "-o", "/d/a.txt", "/d/a.gz"]
        );
        assert_eq!(argv(&decompress_directory("/d")), vec!["-d", "-R", "/d"]);
        assert_eq!(
            argv(&decompress_directory_busy_poll("/d")),
            vec!["-d", "-R", "-P", "busy", "/d"]
        );
        assert_eq!(argv(&decompress_files(["/x.gz"])), vec!["-d", "/x.gz"]);
    }
}
