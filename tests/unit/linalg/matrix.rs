use super::*;

fn sample_invertible() -> Matrix {
    Matrix::from_rows(&[
        [4.0, 7.0, 2.0, 3.0],
        [0.0, 5.0, 0.0, 1.0],
        [2.0, 1.0, 6.0, 0.0],
        [1.0, 0.0, 3.0, 8.0],
    ])
}

#[test]
fn multiply_checks_shapes() {
    let a = Matrix::new(3, 2);
    let b = Matrix::new(2, 2);
    let err = a.multiply(&b).unwrap_err();
    assert!(matches!(err, WireError::DimensionMismatch(_)));

    let row = Matrix::row_vector([1.0, 2.0, 3.0, 1.0]);
    let out = row.multiply(&Matrix::identity(4)).unwrap();
    assert_eq!(out.width(), 4);
    assert_eq!(out.height(), 1);
    assert_eq!(out.row(0), &[1.0, 2.0, 3.0, 1.0]);
}

#[test]
fn multiply_matches_hand_computed_product() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
    let p = a.multiply(&b).unwrap();
    assert_eq!(p, Matrix::from_rows(&[[19.0, 22.0], [43.0, 50.0]]));
}

#[test]
fn inverse_times_matrix_is_identity() {
    let m = sample_invertible();
    let inv = m.inverse4x4().unwrap().expect("matrix is invertible");
    let product = m.multiply(&inv).unwrap();
    assert!(product.approx_eq(&Matrix::identity(4), 1e-5), "{product}");
}

#[test]
fn inverse_of_rotation_and_translation() {
    let rot = Matrix::rotation4x4(Vector3F::new(30.0, -45.0, 110.0));
    let inv = rot.inverse4x4().unwrap().unwrap();
    assert!(
        rot.multiply(&inv)
            .unwrap()
            .approx_eq(&Matrix::identity(4), 1e-5)
    );

    let t = Matrix::translation4x4(Vector3F::new(-1.0, 2.5, 10.0));
    let inv = t.inverse4x4().unwrap().unwrap();
    assert!(inv.approx_eq(
        &Matrix::translation4x4(Vector3F::new(1.0, -2.5, -10.0)),
        1e-6
    ));
}

#[test]
fn singular_matrix_has_no_inverse() {
    let mut m = sample_invertible();
    for c in 0..4 {
        m[(2, c)] = m[(0, c)] * 2.0;
    }
    assert!(m.inverse4x4().unwrap().is_none());
    assert!(Matrix::new(4, 4).inverse4x4().unwrap().is_none());
}

#[test]
fn inverse_requires_4x4() {
    assert!(matches!(
        Matrix::identity(3).inverse4x4(),
        Err(WireError::DimensionMismatch(_))
    ));
}

#[test]
fn translation_moves_row_vectors() {
    let t = Matrix::translation4x4(Vector3F::new(1.0, -2.0, 3.0));
    let p = t.transform_row4([10.0, 10.0, 10.0, 1.0]).unwrap();
    assert_eq!(p, [11.0, 8.0, 13.0, 1.0]);
}

#[test]
fn transform_row4_agrees_with_multiply() {
    let m = sample_invertible();
    let v = [0.5, -1.0, 2.0, 1.0];
    let via_multiply = Matrix::row_vector(v).multiply(&m).unwrap();
    assert_eq!(via_multiply.row(0), &m.transform_row4(v).unwrap());
}

#[test]
fn zero_rotation_is_identity() {
    assert_eq!(Matrix::rotation4x4(Vector3F::ZERO), Matrix::identity(4));
}

#[test]
fn display_lists_rows() {
    let s = Matrix::identity(2).to_string();
    assert!(s.starts_with("Matrix["));
    assert!(s.contains("1, 0"));
}
