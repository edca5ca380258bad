use fsiwave_decode::{decode, DecodeError, FrameType, RawFrame, TimeSpan};

#[test]
fn decoded_frame_exports_as_json() {
    let span = TimeSpan {
        start_s: 0.001,
        end_s: 0.002,
    };
    let window = [0xF9, 0x40, 0x42, 0x01, 0x02, 0x7A, 0x36, 0xF0];
    let frame = decode(&RawFrame::new(&window, span)).expect("valid frame");
    assert_eq!(frame.frame_type, FrameType::Ack);

    let value = serde_json::to_value(&frame).expect("serializable");
    assert_eq!(value["frame_type"], "Ack");
    assert_eq!(value["user_data"], 0x42);
    assert_eq!(value["data_words"], serde_json::json!([0x01, 0x02]));
    assert_eq!(value["crc"], 0x7A);
    assert_eq!(value["frame_tag"], 0x3);
    assert_eq!(value["span"]["start_s"], 0.001);
    assert_eq!(value["span"]["end_s"], 0.002);
}

#[test]
fn unknown_type_serializes_with_its_code() {
    let span = TimeSpan {
        start_s: 0.0,
        end_s: 0.0,
    };
    let window = [0xF9, 0xA0, 0x00, 0x7A, 0x06, 0xF0];
    let frame = decode(&RawFrame::new(&window, span)).expect("valid frame");
    assert_eq!(frame.frame_type, FrameType::Unknown(0b101));

    let value = serde_json::to_value(&frame).expect("serializable");
    assert_eq!(value["frame_type"], serde_json::json!({ "Unknown": 0b101 }));
}

#[test]
fn rejections_render_for_operators() {
    let span = TimeSpan {
        start_s: 0.0,
        end_s: 0.0,
    };
    let window = [0xE9, 0x00, 0x42, 0x7A, 0x16, 0xF0];
    let err = decode(&RawFrame::new(&window, span)).unwrap_err();
    assert_eq!(err, DecodeError::BadPreamble(0xE));
    assert_eq!(err.to_string(), "preamble nibble 0xe, expected 0xf");
}
