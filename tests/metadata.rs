use anyhow::Result;
use capilink::metadata::{
    BlockParam, DataType, ModelInfo, ModelInfoDoc, ModelParam, Orientation, Signal,
};
use tempfile::NamedTempFile;

fn scalar_double() -> DataType {
    DataType {
        c_type: "real_T".to_string(),
        python_type: "numpy.float64".to_string(),
        dims: vec![1, 1],
        orientation: Orientation::Scalar,
    }
}

fn vector_double(len: isize) -> DataType {
    DataType {
        c_type: "real_T".to_string(),
        python_type: "numpy.float64".to_string(),
        dims: vec![1, len],
        orientation: Orientation::Vector,
    }
}

fn sample_info() -> ModelInfo {
    let mut info = ModelInfo::new("engine");
    info.model_params.push(ModelParam {
        name: "Kp".to_string(),
        data_type: scalar_double(),
    });
    info.model_params.push(ModelParam {
        name: "Ki".to_string(),
        data_type: scalar_double(),
    });
    info.block_params.push(BlockParam {
        block_name: "Controller/Gain1".to_string(),
        name: "Gain".to_string(),
        data_type: scalar_double(),
    });
    info.signals.push(Signal {
        block_name: "Controller/Gain1".to_string(),
        signal_name: "u".to_string(),
        data_type: vector_double(4),
    });
    info.signals.push(Signal {
        block_name: "Plant/Integrator".to_string(),
        signal_name: "x".to_string(),
        data_type: scalar_double(),
    });
    info
}

#[test]
fn model_info_preserves_insertion_order() {
    let info = sample_info();
    let param_names: Vec<&str> = info.model_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(param_names, vec!["Kp", "Ki"]);
    let signal_names: Vec<&str> = info
        .signals
        .iter()
        .map(|s| s.signal_name.as_str())
        .collect();
    assert_eq!(signal_names, vec!["u", "x"]);
}

#[test]
fn model_info_lookups() {
    let info = sample_info();
    let sig = info.find_signal("Controller/Gain1", "u").expect("signal");
    assert_eq!(sig.data_type.dims, vec![1, 4]);
    assert!(info.find_signal("Controller/Gain1", "y").is_none());
    assert!(info.find_model_param("Kp").is_some());
    assert!(info.find_model_param("Kd").is_none());

    assert_eq!(info.signals_of("Controller/Gain1").count(), 1);
    assert_eq!(info.params_of("Controller/Gain1").count(), 1);
    assert_eq!(info.params_of("Plant/Integrator").count(), 0);
}

#[test]
fn orientation_dim_consistency() {
    assert!(Orientation::Scalar.accepts_dims(&[1, 1]));
    assert!(!Orientation::Scalar.accepts_dims(&[1, 4]));

    assert!(Orientation::Vector.accepts_dims(&[1, 4]));
    assert!(Orientation::Vector.accepts_dims(&[4, 1]));
    assert!(!Orientation::Vector.accepts_dims(&[3, 4]));
    assert!(!Orientation::Vector.accepts_dims(&[2, 2, 2]));

    assert!(Orientation::MatrixRowMajor.accepts_dims(&[3, 4]));
    assert!(!Orientation::MatrixRowMajor.accepts_dims(&[3]));
    assert!(Orientation::MatrixColMajor.accepts_dims(&[3, 4]));

    assert!(Orientation::MatrixColMajorNd.accepts_dims(&[2, 3, 4]));
    assert!(!Orientation::MatrixColMajorNd.accepts_dims(&[3, 4]));
    assert!(Orientation::MatrixRowMajorNd.accepts_dims(&[2, 3, 4, 5]));

    assert!(scalar_double().dims_consistent());
    assert!(vector_double(4).dims_consistent());
    let bad = DataType {
        dims: vec![3, 4],
        ..scalar_double()
    };
    assert!(!bad.dims_consistent());
}

#[test]
fn binary_doc_round_trip() -> Result<()> {
    let doc = ModelInfoDoc {
        info: sample_info(),
    };

    let temp_file = NamedTempFile::new()?;
    doc.save_to_binary(temp_file.path())?;
    let loaded = ModelInfoDoc::load_from_binary(temp_file.path())?;

    assert_eq!(loaded.info, doc.info);
    assert_eq!(loaded.info.model_name, "engine");
    Ok(())
}

#[test]
fn binary_doc_rejects_wrong_magic() -> Result<()> {
    let temp_file = NamedTempFile::new()?;
    std::fs::write(temp_file.path(), b"NOTADOC!rest of the file")?;
    let err = ModelInfoDoc::load_from_binary(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("magic"), "got: {}", err);
    Ok(())
}
