use crate::types::VId;
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Result, Write},
    path::{Path, PathBuf},
};

/// The path of shard `index` (1-based): `-index` goes before the extension.
pub fn shard_path(prefix: &Path, index: usize) -> PathBuf {
    let stem = prefix
        .file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
    let name = match prefix.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index),
    };
    prefix.with_file_name(name)
}

/// Names the first and last of `num_shards` shard paths.
pub fn shard_range(prefix: &Path, num_shards: usize) -> String {
    let first = shard_path(prefix, 1);
    if num_shards <= 1 {
        first.display().to_string()
    } else {
        format!(
            "{} through {}",
            first.display(),
            shard_path(prefix, num_shards).display()
        )
    }
}

/// Counts for one anchor edge, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusRow {
    from: VId,
    to: VId,
    counts: Vec<usize>,
}

impl CensusRow {
    pub fn new(from: VId, to: VId, counts: Vec<usize>) -> Self {
        Self { from, to, counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
}

impl fmt::Display for CensusRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.from, self.to)?;
        for count in &self.counts {
            write!(f, ",{}", count)?;
        }
        Ok(())
    }
}

/// A CSV shard: `from,to,<pattern names>` and then one line per row.
pub struct CsvSink<W: Write> {
    buf: W,
}

impl CsvSink<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(buf: W) -> Self {
        Self { buf }
    }

    pub fn write_header<'a, I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        write!(self.buf, "from,to")?;
        for name in names {
            write!(self.buf, ",{}", name)?;
        }
        writeln!(self.buf)
    }

    /// The line is formatted in full before any of it is written.
    pub fn write_row(&mut self, row: &CensusRow) -> Result<()> {
        let line = format!("{}\n", row);
        self.buf.write_all(line.as_bytes())
    }

    pub fn finish(mut self) -> Result<W> {
        self.buf.flush()?;
        Ok(self.buf)
    }
}
