// Unit tests for domain rules

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::rules::*;

fn trim(from: f64, to: f64) -> Transformation {
    Transformation::Trim {
        from: VideoDuration::from_seconds(from),
        to: VideoDuration::from_seconds(to),
    }
}

fn convert(to: Format, codec: Codec) -> Transformation {
    Transformation::Convert { to, codec }
}

fn source(format: Format, seconds: f64) -> SourceMedia {
    SourceMedia {
        format,
        duration: VideoDuration::from_seconds(seconds),
    }
}

#[test]
fn execution_order_ignores_insertion_order() {
    let mut plan = TransformationPlan::new();
    plan.push(convert(Format::Webm, Codec::Vp9));
    plan.push(Transformation::Grayscale);
    plan.push(trim(10.0, 20.0));

    let kinds: Vec<TransformationKind> = execution_order(&plan)
        .iter()
        .map(|step| step.kind())
        .collect();

    assert_eq!(
        kinds,
        vec![
            TransformationKind::Trim,
            TransformationKind::Grayscale,
            TransformationKind::Convert,
        ]
    );
}

#[test]
fn execution_order_covers_all_four_phases() {
    let mut plan = TransformationPlan::new();
    plan.push(Transformation::Mute);
    plan.push(convert(Format::Avi, Codec::H264));
    plan.push(trim(0.0, 5.0));
    plan.push(Transformation::Grayscale);

    let kinds: Vec<TransformationKind> = execution_order(&plan)
        .iter()
        .map(|step| step.kind())
        .collect();

    assert_eq!(
        kinds,
        vec![
            TransformationKind::Trim,
            TransformationKind::Mute,
            TransformationKind::Grayscale,
            TransformationKind::Convert,
        ]
    );
}

#[test]
fn only_the_first_convert_is_honored() {
    let mut plan = TransformationPlan::new();
    plan.push(convert(Format::Webm, Codec::Vp9));
    plan.push(convert(Format::Avi, Codec::H264));

    let steps = execution_order(&plan);
    assert_eq!(steps.len(), 1);
    assert_eq!(
        *steps[0],
        convert(Format::Webm, Codec::Vp9)
    );
}

#[test]
fn trim_validation_rejects_reversed_bounds() {
    let result = validate_transformation(&trim(20.0, 10.0), &source(Format::Mp4, 60.0));
    assert!(matches!(result, Err(DomainError::InvalidTrimRange { .. })));

    let result = validate_transformation(&trim(10.0, 10.0), &source(Format::Mp4, 60.0));
    assert!(matches!(result, Err(DomainError::InvalidTrimRange { .. })));
}

#[test]
fn trim_validation_rejects_out_of_bounds_end() {
    let result = validate_transformation(&trim(10.0, 90.0), &source(Format::Mp4, 60.0));
    assert!(matches!(result, Err(DomainError::TrimOutOfBounds { .. })));
}

#[test]
fn trim_validation_accepts_full_span() {
    let result = validate_transformation(&trim(0.0, 60.0), &source(Format::Mp4, 60.0));
    assert!(result.is_ok());
}

#[test]
fn convert_validation_checks_the_codec_registry() {
    let ok = validate_transformation(
        &convert(Format::Webm, Codec::Vp8),
        &source(Format::Mp4, 60.0),
    );
    assert!(ok.is_ok());

    let err = validate_transformation(
        &convert(Format::Mp4, Codec::Vp9),
        &source(Format::Mp4, 60.0),
    );
    assert!(matches!(err, Err(DomainError::UnsupportedCodec { .. })));
}
