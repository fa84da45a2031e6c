use std::path::Path;
use lofty::{ItemKey, MimeType, Picture, PictureType, Tag, TagExt, TagType, TaggedFileExt};

/// Minimal mono 16-bit PCM WAV: RIFF header, fmt chunk, data chunk with a
/// deterministic non-zero sample ramp.
pub fn write_wav(path: &Path) {
    let mut samples = Vec::new();
    for i in 0..128i16 {
        samples.extend_from_slice(&(i * 63).to_le_bytes());
    }

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36u32 + samples.len() as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&16000u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(samples.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&samples);

    std::fs::write(path, bytes).unwrap();
}

/// Minimal FLAC: stream marker, a lone STREAMINFO block (44.1 kHz, mono,
/// 16-bit, zero total samples) and a stand-in frame region.
pub fn write_flac(path: &Path) {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"fLaC");

    // STREAMINFO, flagged as the last metadata block, 34 bytes.
    bytes.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]);
    bytes.extend_from_slice(&[0x10, 0x00]); // min block size 4096
    bytes.extend_from_slice(&[0x10, 0x00]); // max block size 4096
    bytes.extend_from_slice(&[0x00, 0x00, 0x00]); // min frame size
    bytes.extend_from_slice(&[0x00, 0x00, 0x00]); // max frame size
    // 44100 Hz (20 bits), 1 channel, 16 bps, 0 total samples
    bytes.extend_from_slice(&[0x0A, 0xC4, 0x40, 0xF0, 0x00, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&[0u8; 16]); // md5

    bytes.extend_from_slice(&[0xA5u8; 64]);

    std::fs::write(path, bytes).unwrap();
}

/// Minimal MP3: four MPEG-1 Layer III frames, 128 kbps at 44.1 kHz, with
/// non-zero filler that cannot alias a frame sync.
pub fn write_mp3(path: &Path) {
    let mut bytes = Vec::new();
    for _ in 0..4 {
        bytes.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
        bytes.extend_from_slice(&[0x11u8; 413]);
    }
    std::fs::write(path, bytes).unwrap();
}

/// A FLAC signature followed by a metadata block header that promises far
/// more bytes than the file holds.
pub fn write_corrupt_flac(path: &Path) {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"fLaC");
    bytes.extend_from_slice(&[0x00, 0xFF, 0xFF, 0xFF]);
    bytes.extend_from_slice(&[0x00, 0x00]);
    std::fs::write(path, bytes).unwrap();
}

pub fn apply_tag(path: &Path, tag_type: TagType, fields: &[(ItemKey, &str)], with_picture: bool) {
    let mut tag = Tag::new(tag_type);
    for (key, value) in fields {
        tag.insert_text(key.clone(), (*value).to_string());
    }
    if with_picture {
        let picture = Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Png),
            None,
            vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        );
        tag.push_picture(picture);
    }
    tag.save_to_path(path).unwrap();
}

/// Total metadata fields still present in the file, pictures included.
pub fn field_count(path: &Path) -> usize {
    let tagged = lofty::read_from_path(path).unwrap();
    tagged
        .tags()
        .iter()
        .map(|tag| tag.len() + tag.pictures().len())
        .sum()
}

/// Payload of the `data` chunk of a WAV file.
pub fn wav_data_chunk(bytes: &[u8]) -> Vec<u8> {
    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let size = u32::from_le_bytes(bytes[pos + 4..pos + 8].try_into().unwrap()) as usize;
        if id == b"data" {
            return bytes[pos + 8..pos + 8 + size].to_vec();
        }
        pos += 8 + size + (size & 1);
    }
    panic!("no data chunk");
}

/// Everything after the last FLAC metadata block, i.e. the frame region.
pub fn flac_frames(bytes: &[u8]) -> Vec<u8> {
    let mut pos = 4;
    loop {
        let header = bytes[pos];
        let len = u32::from_be_bytes([0, bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]]) as usize;
        pos += 4 + len;
        if header & 0x80 != 0 {
            return bytes[pos..].to_vec();
        }
    }
}

/// Everything from the first MPEG frame sync onward.
pub fn mp3_frames(bytes: &[u8]) -> Vec<u8> {
    for i in 0..bytes.len() - 1 {
        if bytes[i] == 0xFF && bytes[i + 1] & 0xE0 == 0xE0 {
            return bytes[i..].to_vec();
        }
    }
    panic!("no frame sync");
}
