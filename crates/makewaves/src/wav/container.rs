//! Streaming WAV container with a frame count declared at open time.

use std::io::{self, Seek, SeekFrom, Write};

/// Wavetables are always mono.
pub const CHANNELS: u16 = 1;

/// Wavetables are always 16-bit signed PCM.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per sample frame.
pub const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Size of the canonical PCM header written by [`write_header`].
pub const HEADER_SIZE: u64 = 44;

/// Bytes of header counted by the RIFF chunk size besides the sample data.
const RIFF_OVERHEAD: u32 = 36;

/// Largest `data` chunk payload a RIFF header can describe.
pub const MAX_DATA_SIZE: u64 = (u32::MAX - RIFF_OVERHEAD) as u64;

const RIFF_SIZE_OFFSET: u64 = 4;
const DATA_SIZE_OFFSET: u64 = 40;

/// Writes a canonical 44-byte mono 16-bit PCM WAV header.
///
/// # Arguments
/// * `writer` - Output writer
/// * `sample_rate` - Frames per second
/// * `data_size` - Size of the `data` chunk payload in bytes
pub fn write_header<W: Write>(writer: &mut W, sample_rate: u32, data_size: u32) -> io::Result<()> {
    let file_size = data_size
        .checked_add(RIFF_OVERHEAD)
        .ok_or_else(|| too_large(u64::from(data_size)))?;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&CHANNELS.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate(sample_rate).to_le_bytes())?;
    writer.write_all(&BLOCK_ALIGN.to_le_bytes())?;
    writer.write_all(&BITS_PER_SAMPLE.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;

    Ok(())
}

/// Bytes per second of a mono 16-bit stream at `sample_rate`.
pub fn byte_rate(sample_rate: u32) -> u32 {
    sample_rate.saturating_mul(u32::from(BLOCK_ALIGN))
}

/// An open WAV container.
///
/// The header is written by [`open`](Self::open) with the declared frame
/// count, frames are appended with [`write_frames`](Self::write_frames), and
/// [`finish`](Self::finish) flushes and hands the writer back. `finish`
/// consumes the container, so nothing can be written after it.
///
/// Dropping a container without calling `finish` leaves whatever was written
/// so far in the writer, with the header still declaring the full count.
#[derive(Debug)]
pub struct WavContainer<W: Write + Seek> {
    writer: W,
    sample_rate: u32,
    start: u64,
    declared_frames: u32,
    frames_written: u64,
}

impl<W: Write + Seek> WavContainer<W> {
    /// Writes the header at the writer's current position.
    pub fn open(mut writer: W, sample_rate: u32, declared_frames: u32) -> io::Result<Self> {
        let data_size = data_size(u64::from(declared_frames))?;
        let start = writer.stream_position()?;
        write_header(&mut writer, sample_rate, data_size)?;

        Ok(Self {
            writer,
            sample_rate,
            start,
            declared_frames,
            frames_written: 0,
        })
    }

    /// Frames per second written into the header.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frame count written into the header at open time.
    pub fn declared_frames(&self) -> u32 {
        self.declared_frames
    }

    /// Frames appended so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Appends a contiguous run of encoded frames.
    ///
    /// `pcm` must hold a whole number of frames.
    pub fn write_frames(&mut self, pcm: &[u8]) -> io::Result<()> {
        let block_align = usize::from(BLOCK_ALIGN);
        if pcm.len() % block_align != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} bytes is not a whole number of {}-byte frames",
                    pcm.len(),
                    block_align
                ),
            ));
        }

        self.writer.write_all(pcm)?;
        self.frames_written += (pcm.len() / block_align) as u64;
        Ok(())
    }

    /// Finalizes the container and returns the writer.
    ///
    /// If the number of frames written differs from the declared count, the
    /// RIFF and `data` sizes are patched in place so the header describes the
    /// bytes actually present.
    pub fn finish(mut self) -> io::Result<W> {
        if self.frames_written != u64::from(self.declared_frames) {
            let data_size = data_size(self.frames_written)?;
            let end = self.writer.stream_position()?;

            self.writer.seek(SeekFrom::Start(self.start + RIFF_SIZE_OFFSET))?;
            self.writer.write_all(&(data_size + RIFF_OVERHEAD).to_le_bytes())?;
            self.writer.seek(SeekFrom::Start(self.start + DATA_SIZE_OFFSET))?;
            self.writer.write_all(&data_size.to_le_bytes())?;
            self.writer.seek(SeekFrom::Start(end))?;
        }

        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Byte size of `frames` frames, if it fits in a RIFF header.
fn data_size(frames: u64) -> io::Result<u32> {
    let bytes = frames.saturating_mul(u64::from(BLOCK_ALIGN));
    if bytes > MAX_DATA_SIZE {
        return Err(too_large(bytes));
    }
    Ok(bytes as u32)
}

fn too_large(bytes: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{} bytes of sample data exceeds the RIFF size limit", bytes),
    )
}
