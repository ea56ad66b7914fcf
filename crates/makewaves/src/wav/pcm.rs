//! PCM data extraction and hashing utilities.

/// Extracts PCM data from a WAV file buffer.
///
/// Used for comparing wavetables by their audio content only.
///
/// # Returns
/// PCM data if found, or None if the buffer is not a RIFF/WAVE file
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 {
        return None;
    }

    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        if chunk_id == b"data" {
            let data_start = pos + 8;
            let data_end = data_start.checked_add(chunk_size)?;
            return wav_data.get(data_start..data_end);
        }

        // Chunks are word aligned
        pos = pos.checked_add(8 + chunk_size + (chunk_size & 1))?;
    }

    None
}

/// Computes the BLAKE3 hash of the PCM data in a WAV file.
///
/// Matches [`RenderSummary::pcm_hash`](crate::RenderSummary::pcm_hash) for
/// a successfully rendered wavetable.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
