//! End-to-end decompile/compile scenarios on real files.

use std::fs;
use std::path::Path;

use flate2::Compression;
use ido_common::{hex, Level, MemorySink};
use ido_container::header::HEADER_LEN;
use ido_container::{
    compile, compress, decompile, Decompiled, Error, TextureKind, TranscodeOptions,
};
use ido_shopdb::{ShopDatabase, ShopRecord, RECORD_SIZE};
use tempfile::tempdir;

fn options() -> TranscodeOptions {
    TranscodeOptions::default()
}

fn sample_header() -> Vec<u8> {
    (0..HEADER_LEN as u8).map(|i| i.wrapping_mul(7)).collect()
}

fn container(header: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut data = header.to_vec();
    data.extend_from_slice(&compress::compress(payload, Compression::default()).unwrap());
    data
}

fn shop_record(index: usize) -> ShopRecord {
    ShopRecord {
        category: if index == 0 { 1 } else { (index % 5) as u16 },
        item_type_id: if index == 0 { 1 } else { index as u16 },
        variant_id: -(index as i16),
        validity: (index % 3) as i16,
        type_flag: (index % 256) as u8,
        set_item_id: index as i32 * 1000,
        name: format!("Item {}", index),
    }
}

fn csv_rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn gamebryo_block_is_copied_verbatim() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("state.ido");
    let mut data = vec![0x14, 0x00, 0x00, 0x00, 0x5F, 0x67, 0x62, 0x00];
    data.extend_from_slice(b"not compressed at all");
    fs::write(&input, &data).unwrap();

    let sink = MemorySink::new();
    let result = decompile(&input, &dir.path().join("state.xml"), &options(), &sink).unwrap();

    assert_eq!(
        result,
        Decompiled::Gamebryo {
            output: dir.path().join("state.gb")
        }
    );
    assert_eq!(result.type_label(), "gamebryo");
    assert_eq!(fs::read(result.output()).unwrap(), data);
    assert!(!sink
        .events()
        .iter()
        .any(|(_, message)| message.starts_with("Decompressing")));
}

#[test]
fn shop_database_single_potion() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("shop.ido");
    let potion = ShopRecord {
        category: 1,
        item_type_id: 1,
        variant_id: 0,
        validity: 1,
        type_flag: 0,
        set_item_id: 0,
        name: "Potion".to_string(),
    };
    let bytes = potion.to_bytes();
    assert_eq!(&bytes[..4], &[0x01, 0x00, 0x01, 0x00]);
    fs::write(&input, bytes).unwrap();

    let sink = MemorySink::new();
    let result = decompile(&input, &dir.path().join("shop.xml"), &options(), &sink).unwrap();

    let output = dir.path().join("shop.csv");
    assert_eq!(
        result,
        Decompiled::ShopDatabase {
            output: output.clone(),
            items: 1,
            trailing_bytes: 0
        }
    );
    assert_eq!(
        csv_rows(&output),
        vec![
            "category,item_type_id,variant_id,validity,type_flag,set_item_id,name".to_string(),
            "1,1,0,1,0,0,Potion".to_string(),
        ]
    );
    assert!(!sink.has(Level::Warning));
}

#[test]
fn shop_database_full_fixture() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("shop.ido");
    let records: Vec<ShopRecord> = (0..454).map(shop_record).collect();
    let data = ShopDatabase::new(records.clone()).to_bytes();
    assert_eq!(data.len(), 454 * RECORD_SIZE);
    fs::write(&input, &data).unwrap();

    let sink = MemorySink::new();
    let result = decompile(&input, &dir.path().join("shop"), &options(), &sink).unwrap();

    match &result {
        Decompiled::ShopDatabase {
            items,
            trailing_bytes,
            ..
        } => {
            assert_eq!(*items, 454);
            assert_eq!(*trailing_bytes, 0);
        }
        other => panic!("expected shop database, got {:?}", other),
    }
    assert!(!sink.has(Level::Warning));

    let rows = csv_rows(result.output());
    assert_eq!(rows.len(), 455);
    assert_eq!(rows[1], "1,1,0,0,0,0,Item 0");
    assert_eq!(rows[454], "3,453,-453,0,197,453000,Item 453");

    let parsed = ShopDatabase::parse(&data).unwrap();
    assert_eq!(parsed.records(), records.as_slice());
}

#[test]
fn shop_database_with_trailing_bytes_warns() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("shop.ido");
    let mut data = ShopDatabase::new((0..454).map(shop_record).collect()).to_bytes();
    data.extend_from_slice(&[0xCD; 10]);
    fs::write(&input, &data).unwrap();

    let sink = MemorySink::new();
    let result = decompile(&input, &dir.path().join("shop"), &options(), &sink).unwrap();

    assert!(matches!(
        result,
        Decompiled::ShopDatabase {
            items: 454,
            trailing_bytes: 10,
            ..
        }
    ));
    let warnings = sink.messages(Level::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("not a multiple of the record size (456)"));
    assert_eq!(csv_rows(result.output()).len(), 455);
}

#[test]
fn dds_texture_gets_extension_and_sidecar() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tex.ido");
    let header = vec![0u8; HEADER_LEN];
    let mut texture = b"DDS ".to_vec();
    texture.extend_from_slice(&[0x7C; 124]);
    fs::write(&input, container(&header, &texture)).unwrap();

    let sink = MemorySink::new();
    let result = decompile(&input, &dir.path().join("tex"), &options(), &sink).unwrap();

    assert_eq!(
        result,
        Decompiled::Texture {
            kind: TextureKind::Dds,
            output: dir.path().join("tex.dds"),
            meta: dir.path().join("tex.meta"),
        }
    );
    assert_eq!(result.type_label(), "DDS Texture");
    assert_eq!(fs::read(result.output()).unwrap(), texture);
    assert_eq!(
        fs::read_to_string(result.meta().unwrap()).unwrap(),
        "00".repeat(HEADER_LEN)
    );
}

#[test]
fn texture_keeps_caller_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tex.ido");
    let mut texture = vec![0, 0, 2, 0, 0, 0];
    texture.extend_from_slice(b"TRUEVISION-XFILE.\0");
    fs::write(&input, container(&sample_header(), &texture)).unwrap();

    let result = decompile(&input, &dir.path().join("tex.bin"), &options(), &MemorySink::new())
        .unwrap();

    assert_eq!(result.output(), dir.path().join("tex.bin"));
    assert_eq!(result.meta().unwrap(), dir.path().join("tex.meta"));
    assert_eq!(result.type_label(), "TGA Texture");
}

#[test]
fn image_container_round_trips() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("icon.ido");
    let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
    png.extend_from_slice(&[0xAB; 300]);
    let data = container(&sample_header(), &png);
    fs::write(&original, &data).unwrap();

    let sink = MemorySink::new();
    let decompiled = decompile(&original, &dir.path().join("icon"), &options(), &sink).unwrap();
    assert_eq!(decompiled.output(), dir.path().join("icon.png"));

    let rebuilt = dir.path().join("rebuilt.ido");
    let compiled = compile(decompiled.output(), &rebuilt, &options(), &sink).unwrap();

    assert_eq!(compiled.header_len, HEADER_LEN);
    assert_eq!(compiled.payload_len, png.len());
    assert_eq!(compiled.size, data.len());
    assert_eq!(fs::read(&rebuilt).unwrap(), data);
}

#[test]
fn xml_container_round_trips() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("item.ido");
    let text = "<?xml version=\"1.0\" encoding=\"euc-kr\"?>\r\n<item name=\"빨간 물약\" price=\"50\"/>";
    let payload = options().text.encode(text).bytes;
    let data = container(&sample_header(), &payload);
    fs::write(&original, &data).unwrap();

    let sink = MemorySink::new();
    let output = dir.path().join("item.xml");
    let decompiled = decompile(&original, &output, &options(), &sink).unwrap();

    assert_eq!(
        decompiled,
        Decompiled::Xml {
            output: output.clone(),
            lossy: false
        }
    );
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with(text));
    assert!(written.ends_with(&format!(
        "\n<!-- IDO HEADER: {} -->",
        hex::encode(&sample_header())
    )));
    assert!(!dir.path().join("item.meta").exists());

    let rebuilt = dir.path().join("rebuilt.ido");
    compile(&output, &rebuilt, &options(), &sink).unwrap();
    assert_eq!(fs::read(&rebuilt).unwrap(), data);
    assert!(!sink.has(Level::Warning));
}

#[test]
fn large_xml_container_round_trips() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("shop_items.ido");
    let mut text = String::from("<?xml version=\"1.0\" encoding=\"euc-kr\"?>\r\n<items>\r\n");
    for i in 0..400 {
        text.push_str(&format!("  <item id=\"{}\" name=\"물약\" price=\"50\"/>\r\n", i % 4));
    }
    text.push_str("</items>");
    let payload = options().text.encode(&text).bytes;
    let data = container(&sample_header(), &payload);
    assert!(payload.len() > (data.len() - HEADER_LEN) * 4);
    fs::write(&original, &data).unwrap();

    let sink = MemorySink::new();
    let output = dir.path().join("shop_items.xml");
    let decompiled = decompile(&original, &output, &options(), &sink).unwrap();
    assert!(matches!(decompiled, Decompiled::Xml { lossy: false, .. }));
    assert!(fs::read_to_string(&output).unwrap().starts_with(&text));

    let rebuilt = dir.path().join("rebuilt.ido");
    let compiled = compile(&output, &rebuilt, &options(), &sink).unwrap();
    assert_eq!(compiled.payload_len, payload.len());
    assert_eq!(fs::read(&rebuilt).unwrap(), data);
}

#[test]
fn short_container_keeps_short_header() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("tiny.ido");
    // Shorter than a full header: everything is header and the payload is empty.
    fs::write(&original, [0xAAu8; 10]).unwrap();

    let result = decompile(&original, &dir.path().join("tiny.xml"), &options(), &MemorySink::new());
    assert!(matches!(result, Err(Error::Decompression(_))));
    assert!(!dir.path().join("tiny.xml").exists());
}

#[test]
fn corrupt_payload_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.ido");
    let mut data = sample_header();
    data.extend_from_slice(b"definitely not a zlib stream");
    fs::write(&input, &data).unwrap();

    let result = decompile(&input, &dir.path().join("broken.xml"), &options(), &MemorySink::new());

    assert!(matches!(result, Err(Error::Decompression(_))));
    assert!(!dir.path().join("broken.xml").exists());
}

#[test]
fn lossy_decode_is_reported() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("lossy.ido");
    fs::write(&input, container(&sample_header(), b"<a>\xFF</a>")).unwrap();

    let sink = MemorySink::new();
    let result = decompile(&input, &dir.path().join("lossy.xml"), &options(), &sink).unwrap();

    assert!(matches!(result, Decompiled::Xml { lossy: true, .. }));
    assert_eq!(sink.messages(Level::Warning).len(), 1);
    let written = fs::read_to_string(result.output()).unwrap();
    assert!(written.starts_with("<a>\u{FFFD}</a>\n<!-- IDO HEADER: "));
}

#[test]
fn compile_with_embedded_marker_only() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("item.xml");
    fs::write(&input, "  <root/>  \n<!-- IDO HEADER: 0a0b0c -->").unwrap();

    let output = dir.path().join("item.ido");
    let sink = MemorySink::new();
    let compiled = compile(&input, &output, &options(), &sink).unwrap();

    let data = fs::read(&output).unwrap();
    assert_eq!(&data[..3], &[0x0A, 0x0B, 0x0C]);
    assert_eq!(compress::decompress(&data[3..]).unwrap(), b"<root/>");
    assert_eq!(compiled.header_len, 3);
    assert_eq!(compiled.size, data.len());
    assert!(sink
        .messages(Level::Info)
        .contains(&"Extracted embedded header from XML".to_string()));
}

#[test]
fn compile_without_any_header_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("item.xml");
    fs::write(&input, "<root/>").unwrap();
    let output = dir.path().join("item.ido");

    let result = compile(&input, &output, &options(), &MemorySink::new());

    assert!(matches!(result, Err(Error::MissingHeader { artifact }) if artifact == input));
    assert!(!output.exists());
}

#[test]
fn sidecar_wins_over_malformed_marker() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("item.xml");
    fs::write(&input, "<root/>\n<!-- IDO HEADER: not-hex -->").unwrap();
    fs::write(dir.path().join("item.meta"), "ff00\n").unwrap();

    let output = dir.path().join("item.ido");
    compile(&input, &output, &options(), &MemorySink::new()).unwrap();

    let data = fs::read(&output).unwrap();
    assert_eq!(&data[..2], &[0xFF, 0x00]);
    assert_eq!(compress::decompress(&data[2..]).unwrap(), b"<root/>");
}

#[test]
fn binary_artifact_requires_sidecar() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tex.dds");
    fs::write(&input, b"DDS payload").unwrap();
    let output = dir.path().join("tex.ido");

    let result = compile(&input, &output, &options(), &MemorySink::new());

    match result {
        Err(Error::MissingHeaderForBinary { sidecar }) => {
            assert_eq!(sidecar, dir.path().join("tex.meta"));
        }
        other => panic!("expected missing sidecar, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn unmappable_characters_are_replaced_with_warning() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("item.xml");
    fs::write(&input, "<a>\u{1F9EA}</a>\n<!-- IDO HEADER: 00 -->").unwrap();

    let output = dir.path().join("item.ido");
    let sink = MemorySink::new();
    compile(&input, &output, &options(), &sink).unwrap();

    let data = fs::read(&output).unwrap();
    assert_eq!(compress::decompress(&data[1..]).unwrap(), b"<a>?</a>");
    let warnings = sink.messages(Level::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("1 characters could not be mapped (EUC-KR)"));
}

#[test]
fn shop_table_cannot_be_compiled() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("shop.csv");
    fs::write(&input, "category\n").unwrap();
    let output = dir.path().join("shop.ido");

    let result = compile(&input, &output, &options(), &MemorySink::new());

    assert!(matches!(result, Err(Error::UnsupportedCompile { .. })));
    assert!(!output.exists());
}

#[test]
fn malformed_sidecar_is_fatal() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tex.dds");
    fs::write(&input, b"DDS payload").unwrap();
    fs::write(dir.path().join("tex.meta"), "abc").unwrap();

    let result = compile(&input, &dir.path().join("tex.ido"), &options(), &MemorySink::new());

    assert!(matches!(
        result,
        Err(Error::Common(ido_common::Error::OddHexLength(3)))
    ));
}

#[test]
fn empty_sidecar_counts_as_missing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tex.dds");
    fs::write(&input, b"DDS payload").unwrap();
    fs::write(dir.path().join("tex.meta"), "\n").unwrap();
    let output = dir.path().join("tex.ido");

    let result = compile(&input, &output, &options(), &MemorySink::new());

    assert!(matches!(result, Err(Error::MissingHeaderForBinary { .. })));
    assert!(!output.exists());
}

#[test]
fn empty_sidecar_falls_back_to_marker() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("item.xml");
    fs::write(&input, "<root/>\n<!-- IDO HEADER: 0102 -->").unwrap();
    fs::write(dir.path().join("item.meta"), "").unwrap();

    let output = dir.path().join("item.ido");
    let sink = MemorySink::new();
    let compiled = compile(&input, &output, &options(), &sink).unwrap();

    assert_eq!(compiled.header_len, 2);
    assert_eq!(&fs::read(&output).unwrap()[..2], &[0x01, 0x02]);
    assert!(!sink
        .messages(Level::Info)
        .iter()
        .any(|message| message.starts_with("Found .meta file")));
}
