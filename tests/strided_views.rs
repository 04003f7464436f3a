#![allow(non_snake_case)]

use hyhound::{algebra::*, updown::*};

const PAD: f64 = -99.;

// copies `M` into a buffer with leading dimension `ld`, starting at
// `offset`, with every other entry set to PAD
fn embed(M: &Matrix<f64>, ld: usize, offset: usize) -> Vec<f64> {
    let (m, n) = M.size();
    let mut buf = vec![PAD; offset + ld * n];
    for c in 0..n {
        for r in 0..m {
            buf[offset + r + ld * c] = M[(r, c)];
        }
    }
    buf
}

fn test_data() -> (Matrix<f64>, Matrix<f64>, [f64; 3]) {
    let L = Matrix::from(&[
        [2., 0., 0., 0.],
        [0.5, 1.5, 0., 0.],
        [-1., 0.25, 3., 0.],
        [0., 1., -0.5, 1.],
    ]);
    let A = Matrix::from(&[
        [0.3, -0.2, 1.],
        [0.1, 0.4, 0.],
        [-0.6, 0.1, 0.2],
        [0.2, -0.3, 0.5],
    ]);
    (L, A, [1., -0.5, 2.])
}

#[test]
fn test_strided_matches_contiguous() {
    let (L, A, S) = test_data();

    let (mut Lc, mut Ac) = (L.clone(), A.clone());
    update(&mut Lc, &mut Ac, &S).unwrap();

    let (ldL, offL) = (7, 3);
    let (ldA, offA) = (5, 1);
    let mut Lbuf = embed(&L, ldL, offL);
    let mut Abuf = embed(&A, ldA, offA);
    {
        let mut Lv = MatrixView::new(&mut Lbuf[offL..], (4, 4), ldL, None).unwrap();
        let mut Av = MatrixView::new(&mut Abuf[offA..], (4, 3), ldA, None).unwrap();
        update(&mut Lv, &mut Av, &S).unwrap();

        // same operations in the same order
        for c in 0..4 {
            for r in c..4 {
                assert_eq!(Lv[(r, c)], Lc[(r, c)]);
            }
        }
    }

    // padding is never touched
    for (i, &x) in Lbuf.iter().enumerate() {
        let inside = i >= offL && (i - offL) % ldL < 4;
        if !inside {
            assert_eq!(x, PAD);
        }
    }
    for (i, &x) in Abuf.iter().enumerate() {
        let inside = i >= offA && (i - offA) % ldA < 4;
        if !inside {
            assert_eq!(x, PAD);
        }
    }
}

#[test]
fn test_upper_triangle_untouched() {
    let (L, A, S) = test_data();
    let mut Lbuf = embed(&L, 4, 0);
    // fill the strict upper triangle with junk
    for c in 0..4 {
        for r in 0..c {
            Lbuf[r + 4 * c] = 1234.;
        }
    }
    let mut Lv = MatrixView::from_slice_mut(&mut Lbuf[..], 4, 4).with_triangle(Some(MatrixTriangle::Tril));
    let mut A = A.clone();
    update(&mut Lv, &mut A, &S).unwrap();

    for c in 0..4 {
        for r in 0..c {
            assert_eq!(Lv[(r, c)], 1234.);
            assert_eq!(Lv.get((r, c)), 0.);
        }
    }
}

#[test]
fn test_bad_views() {
    let mut buf = vec![0.; 10];
    assert_eq!(
        MatrixView::new(&mut buf[..], (4, 3), 3, None).unwrap_err(),
        MatrixViewError::BadStride { rows: 4, ld: 3 }
    );
    assert_eq!(
        MatrixView::new(&mut buf[..], (4, 3), 4, None).unwrap_err(),
        MatrixViewError::BufferTooShort {
            required: 12,
            found: 10
        }
    );
    // the last column does not need trailing padding
    assert!(MatrixRef::new(&buf[..], (2, 3), 4, None).is_ok());
}

#[test]
fn test_perturbation_is_consumed() {
    let (mut L, mut A, S) = test_data();
    update(&mut L, &mut A, &S).unwrap();

    // every row of A is absorbed into the factor
    assert!(A.data().norm_inf() < 1e-12);
}
