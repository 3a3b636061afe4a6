use parlance::domain::AudioFormat;

#[test]
fn given_riff_header_when_sniffing_then_returns_wav() {
    let data = [0x52, 0x49, 0x46, 0x46, 0x24, 0x00, 0x00, 0x00];
    assert_eq!(AudioFormat::sniff(&data), AudioFormat::Wav);
}

#[test]
fn given_oggs_header_when_sniffing_then_returns_ogg() {
    let data = [0x4F, 0x67, 0x67, 0x53, 0x00, 0x02];
    assert_eq!(AudioFormat::sniff(&data), AudioFormat::Ogg);
}

#[test]
fn given_ftyp_header_when_sniffing_then_returns_m4a() {
    let data = [0x66, 0x74, 0x79, 0x70, 0x4D, 0x34, 0x41, 0x20];
    assert_eq!(AudioFormat::sniff(&data), AudioFormat::M4a);
}

#[test]
fn given_id3_header_when_sniffing_then_returns_mp3() {
    let data = [0x49, 0x44, 0x33, 0x03, 0x00, 0x00];
    assert_eq!(AudioFormat::sniff(&data), AudioFormat::Mp3);
}

#[test]
fn given_mpeg_frame_sync_when_sniffing_then_returns_mp3() {
    let data = [0xFF, 0xFB, 0x90, 0x00];
    assert_eq!(AudioFormat::sniff(&data), AudioFormat::Mp3);
}

#[test]
fn given_unrecognized_header_when_sniffing_then_returns_unknown() {
    let data = [0x00, 0x01, 0x02, 0x03];
    assert_eq!(AudioFormat::sniff(&data), AudioFormat::Unknown);
}

#[test]
fn given_empty_buffer_when_sniffing_then_returns_unknown() {
    assert_eq!(AudioFormat::sniff(&[]), AudioFormat::Unknown);
}

#[test]
fn given_buffer_shorter_than_signature_when_sniffing_then_still_matches_two_byte_prefixes() {
    // Frame-sync prefixes are only two bytes long.
    let data = [0xFF, 0xFA];
    assert_eq!(AudioFormat::sniff(&data), AudioFormat::Mp3);
}
