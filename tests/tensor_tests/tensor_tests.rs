//! Tests for the tensor layer
//!
//! These tests verify:
//! - Value encoding keeps name, shape and exact floats
//! - Shape and name validation on save
//! - Load, preview and summary
//! - Text import parsing
//! - The dry-run and training scenarios

use embedkv::tensor::{
    decode_value, encode_value, summarize, Tensor, TensorInfo, TensorStore,
    DEFAULT_PREVIEW_LIMIT,
};
use embedkv::{Config, EmbedError, PutOutcome};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store(limit: usize) -> TensorStore {
    let config = Config::builder().memtable_max_entries(limit).build();
    TensorStore::with_config(config).unwrap()
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_value_layout() {
    let info = TensorInfo::new("w", 1, 3);
    assert_eq!(encode_value(&info, &[0.5, -1.0, 2.25]).unwrap(), "w;1;3;0.5,-1,2.25");
}

#[test]
fn test_decode_keeps_exact_floats_and_odd_names() {
    let info = TensorInfo::new("block;v2", 2, 2);
    let values = vec![0.1f32, 1.0 / 3.0, f32::MIN_POSITIVE, -7.5e10];

    let (decoded_info, decoded) = decode_value(&encode_value(&info, &values).unwrap()).unwrap();

    assert_eq!(decoded_info, info);
    assert_eq!(decoded, values);
}

#[test]
fn test_empty_shape_encodes() {
    let info = TensorInfo::new("empty", 0, 4);
    let encoded = encode_value(&info, &[]).unwrap();
    assert_eq!(decode_value(&encoded).unwrap(), (info, vec![]));
}

#[test]
fn test_encode_rejects_shape_mismatch_and_bad_names() {
    let cases = [
        (TensorInfo::new("w", 2, 2), vec![1.0f32; 3]),
        (TensorInfo::new("", 1, 1), vec![1.0]),
        (TensorInfo::new(" w", 1, 1), vec![1.0]),
    ];
    for (info, values) in cases {
        assert!(matches!(
            encode_value(&info, &values),
            Err(EmbedError::InvalidInput(_))
        ));
    }
}

#[test]
fn test_decode_rejects_foreign_values() {
    for value in ["plain string", "w;1;x;1", "w;1;2;1", "w;1;1;abc"] {
        assert!(
            matches!(decode_value(value), Err(EmbedError::Decode(_))),
            "expected decode error for {:?}",
            value
        );
    }
}

// =============================================================================
// Summary Tests
// =============================================================================

#[test]
fn test_summarize_truncates_long_tensors() {
    let info = TensorInfo::new("latent_block", 1, 256);
    let values = vec![0.9f32; 256];

    assert_eq!(
        summarize(&info, &values, 3),
        "latent_block (1x256) -> 0.9, 0.9, 0.9, ..."
    );
}

#[test]
fn test_summarize_short_tensor_has_no_ellipsis() {
    let info = TensorInfo::new("w", 1, 2);
    assert_eq!(summarize(&info, &[1.5, -2.0], DEFAULT_PREVIEW_LIMIT), "w (1x2) -> 1.5, -2");
}

// =============================================================================
// Store Tests
// =============================================================================

#[test]
fn test_save_and_load_through_memtable_and_sstable() {
    let mut store = setup_store(2);
    let info = TensorInfo::new("frame", 2, 2);

    store.save(7, &info, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let outcome = store.save(8, &info, &[5.0, 6.0, 7.0, 8.0]).unwrap();
    assert!(matches!(outcome, PutOutcome::Flushed(_)));
    store.save(7, &info, &[0.0, 0.0, 0.0, 1.0]).unwrap();

    // Newest version lives in the memtable
    assert_eq!(store.load(7).unwrap().unwrap().values, vec![0.0, 0.0, 0.0, 1.0]);
    // Older tensor comes from SSTable-0
    let loaded = store.load(8).unwrap().unwrap();
    assert_eq!(loaded, Tensor::new(8, info, vec![5.0, 6.0, 7.0, 8.0]));

    assert_eq!(store.load(9).unwrap(), None);
}

#[test]
fn test_rejected_save_leaves_engine_untouched() {
    let mut store = setup_store(5);

    assert!(store.save(1, &TensorInfo::new("w", 2, 2), &[1.0]).is_err());

    assert!(store.engine().snapshot().is_empty());
}

#[test]
fn test_load_preview() {
    let mut store = setup_store(5);
    store
        .save(3, &TensorInfo::new("w", 1, 5), &[1.0, 2.0, 3.0, 4.0, 5.0])
        .unwrap();

    let (tensor, preview) = store.load_preview(3, 2).unwrap().unwrap();
    assert_eq!(tensor.values.len(), 5);
    assert_eq!(preview, vec![1.0, 2.0]);

    assert!(store.load_preview(4, 2).unwrap().is_none());
}

#[test]
fn test_save_batch_stops_at_first_invalid() {
    let mut store = setup_store(10);
    let batch = vec![
        Tensor::new(1, TensorInfo::new("a", 1, 1), vec![1.0]),
        Tensor::new(2, TensorInfo::new("b", 1, 2), vec![1.0]),
        Tensor::new(3, TensorInfo::new("c", 1, 1), vec![3.0]),
    ];

    assert!(store.save_batch(&batch).is_err());

    assert!(store.load(1).unwrap().is_some());
    assert!(store.load(3).unwrap().is_none());
}

// =============================================================================
// Text Import Tests
// =============================================================================

#[test]
fn test_parse_text() {
    let tensor = Tensor::parse_text("42, layer1_weights, 2, 2\n0.5, 0.25,, -1, 3.75\n").unwrap();

    assert_eq!(tensor.key, 42);
    assert_eq!(tensor.info, TensorInfo::new("layer1_weights", 2, 2));
    assert_eq!(tensor.values, vec![0.5, 0.25, -1.0, 3.75]);
}

#[test]
fn test_parse_text_errors() {
    for text in ["42,w,1,1", "42,w,1\n1.0", "x,w,1,1\n1.0", "1,w,1,1\n1.0,oops"] {
        assert!(
            matches!(Tensor::parse_text(text), Err(EmbedError::InvalidInput(_))),
            "expected invalid input for {:?}",
            text
        );
    }
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_dry_run_scenario_reads_back_from_sstable() {
    let mut store = TensorStore::new().unwrap();

    let replay = store.dry_run_scenario().unwrap();

    assert_eq!(replay.len(), 2);
    assert_eq!(replay[0].key, 101);
    assert_eq!(replay[0].info, TensorInfo::new("camera_frame", 32, 32));
    assert!(replay[0].values.iter().all(|v| *v == 0.25));
    assert_eq!(replay[1].values.len(), 256);
    assert_eq!(store.engine().sstable_count(), 1);
    assert!(store.engine().memtable().is_empty());
}

#[test]
fn test_training_scenario_saves_every_epoch() {
    let mut store = TensorStore::new().unwrap();

    let history = store.training_scenario(3).unwrap();

    assert_eq!(history.len(), 3);
    let keys: Vec<u64> = history.iter().map(|t| t.key).collect();
    assert_eq!(keys, vec![1000, 1001, 1002]);

    // w0 = 0.1 - 3 * 0.5 * 0.01
    assert!((history[2].values[0] - 0.085).abs() < 1e-6);
    assert!((history[2].values[1] - -0.155).abs() < 1e-6);

    for tensor in &history {
        assert_eq!(store.load(tensor.key).unwrap().as_ref(), Some(tensor));
    }
    assert_eq!(store.engine().sstable_count(), 1);
}
