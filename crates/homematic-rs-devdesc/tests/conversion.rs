//! Integration tests for converting parameter values between packet bytes
//! and RPC values, built through the public builder API only.

use homematic_rs_devdesc::cast::{
    BooleanInteger, DecimalIntegerScale, IntegerIntegerMap, MapDirection, OptionString, Round,
    StringUnsignedInteger, TimeStringSeconds,
};
use homematic_rs_devdesc::logical::{
    EnumerationValue, LogicalBoolean, LogicalDecimal, LogicalEnumeration, LogicalInteger,
    LogicalString,
};
use homematic_rs_devdesc::{
    Endianess, Logical, Parameter, Physical, Role, RoleDirection, ScaleRange, Variable,
    VariableType,
};

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

fn no_role() -> Role {
    Role::default()
}

/// Setpoint temperature of a thermostat: two bytes, tenths of a degree.
fn set_temperature() -> Parameter {
    Parameter::builder("SET_TEMPERATURE")
        .logical(Logical::Decimal(LogicalDecimal::new(4.5, 30.5)))
        .physical(Physical::integer(9.0, 2.0))
        .cast(DecimalIntegerScale::new(10.0, 0.0))
        .unit("°C")
        .build()
        .expect("SET_TEMPERATURE should build")
}

fn mode_enum() -> Logical {
    Logical::Enumeration(LogicalEnumeration::new(vec![
        EnumerationValue::new("OFF", 0),
        EnumerationValue::new("ON", 1),
        EnumerationValue::new("AUTO", 2),
    ]))
}

#[test]
fn test_decimal_with_scale_both_directions() {
    init_logging();
    let parameter = set_temperature();

    let value = parameter.convert_from_packet(&[0x00, 0xD7], &no_role(), false);
    assert_eq!(value.kind, VariableType::Float);
    assert_eq!(value.float_value, 21.5);

    assert_eq!(
        parameter.convert_to_packet(&Variable::from(21.5), &no_role()),
        vec![0x00, 0xD7]
    );
}

#[test]
fn test_decimal_is_clamped_to_logical_range() {
    init_logging();
    let parameter = set_temperature();

    // 40.0 °C on the wire decodes to the maximum.
    let value = parameter.convert_from_packet(&[0x01, 0x90], &no_role(), false);
    assert_eq!(value.float_value, 30.5);

    // Encoding below the minimum sends the minimum.
    assert_eq!(
        parameter.convert_to_packet(&Variable::from(1.0), &no_role()),
        vec![0x00, 0x2D]
    );
}

#[test]
fn test_text_input_follows_the_logical_type() {
    init_logging();
    let parameter = set_temperature();
    assert_eq!(
        parameter.convert_to_packet_from_str("22.0", &no_role()),
        vec![0x00, 0xDC]
    );

    let mode = Parameter::builder("MODE")
        .logical(mode_enum())
        .physical(Physical::integer(1.0, 1.0))
        .build()
        .unwrap();
    assert_eq!(mode.convert_to_packet_from_str("AUTO", &no_role()), vec![0x02]);
    assert_eq!(mode.convert_to_packet_from_str("1", &no_role()), vec![0x01]);
}

#[test]
fn test_enumeration_with_inverting_role() {
    init_logging();
    let parameter = Parameter::builder("MODE")
        .logical(mode_enum())
        .physical(Physical::integer(1.0, 1.0))
        .build()
        .unwrap();
    let invert = Role::new(7).with_invert(true);

    let value = parameter.convert_from_packet(&[0x00], &invert, false);
    assert_eq!(value.kind, VariableType::Integer);
    assert_eq!(value.integer_value, 2);

    assert_eq!(
        parameter.convert_to_packet(&Variable::from(2), &invert),
        vec![0x00]
    );
    // The id is resolved before the role is applied.
    assert_eq!(
        parameter.convert_to_packet(&Variable::from("OFF"), &invert),
        vec![0x02]
    );
}

#[test]
fn test_role_direction_limits_where_it_applies() {
    init_logging();
    let parameter = Parameter::builder("STATE")
        .logical(Logical::Boolean(LogicalBoolean::default()))
        .physical(Physical::integer(0.0, 1.0))
        .build()
        .unwrap();
    let input_only = Role::new(1)
        .with_invert(true)
        .with_direction(RoleDirection::Input);

    let value = parameter.convert_from_packet(&[0x01], &input_only, false);
    assert!(!value.boolean_value);

    // Input-only roles leave the encoded value alone.
    assert_eq!(
        parameter.convert_to_packet(&Variable::from(true), &input_only),
        vec![0x01]
    );
}

#[test]
fn test_cast_chain_runs_forward_then_reverse() {
    init_logging();
    let parameter = Parameter::builder("ACTUAL_TEMPERATURE")
        .logical(Logical::Decimal(LogicalDecimal::new(-40.0, 100.0)))
        .physical(Physical::integer(2.0, 2.0))
        .cast(DecimalIntegerScale::new(10.0, 0.0))
        .cast(Round::new("1"))
        .build()
        .unwrap();

    let value = parameter.convert_from_packet(&[0x00, 0x67], &no_role(), false);
    assert_eq!(value.float_value, 10.3);

    // Encoding rounds first, then scales back to an integer.
    assert_eq!(
        parameter.convert_to_packet(&Variable::from(10.34), &no_role()),
        vec![0x00, 0x67]
    );
}

#[test]
fn test_boolean_threshold_cast_in_a_parameter() {
    init_logging();
    let parameter = Parameter::builder("MOTION")
        .logical(Logical::Boolean(LogicalBoolean::default()))
        .physical(Physical::integer(0.0, 1.0))
        .cast(BooleanInteger::with_threshold(5))
        .build()
        .unwrap();

    assert!(!parameter.convert_from_packet(&[4], &no_role(), false).boolean_value);
    assert!(parameter.convert_from_packet(&[5], &no_role(), false).boolean_value);
}

#[test]
fn test_value_mapping_for_device_values() {
    init_logging();
    let parameter = Parameter::builder("ERROR")
        .logical(Logical::Integer(LogicalInteger::new(0, 3)))
        .physical(Physical::integer(0.0, 1.0))
        .cast(
            IntegerIntegerMap::new(MapDirection::Both)
                .with_mapping(0x10, 1)
                .with_mapping(0x20, 2),
        )
        .build()
        .unwrap();

    assert_eq!(
        parameter
            .convert_from_packet(&[0x20], &no_role(), false)
            .integer_value,
        2
    );
    assert_eq!(
        parameter.convert_to_packet(&Variable::from(1), &no_role()),
        vec![0x10]
    );
}

#[test]
fn test_signed_little_endian_field() {
    init_logging();
    let parameter = Parameter::builder("POWER_OFFSET")
        .logical(Logical::Integer(LogicalInteger::new(-1000, 1000)))
        .physical(Physical::integer(4.0, 2.0).with_endianess(Endianess::Little))
        .signed(true)
        .build()
        .unwrap();

    // -2 is 0xFFFE, sent low byte first.
    let value = parameter.convert_from_packet(&[0xFE, 0xFF], &no_role(), false);
    assert_eq!(value.integer_value, -2);
    assert_eq!(
        parameter.convert_to_packet(&Variable::from(-2), &no_role()),
        vec![0xFE, 0xFF]
    );
}

#[test]
fn test_integer_values_survive_a_round_trip() {
    init_logging();
    let parameter = Parameter::builder("LEVEL")
        .logical(Logical::Integer(LogicalInteger::new(0, 200)))
        .physical(Physical::integer(1.0, 1.0))
        .build()
        .unwrap();

    for level in 0..=200 {
        let packet = parameter.convert_to_packet(&Variable::from(level), &no_role());
        let decoded = parameter.convert_from_packet(&packet, &no_role(), false);
        assert_eq!(decoded.integer_value, level, "level {level} did not survive");
    }
}

#[test]
fn test_scaling_role_maps_percent_to_device_range() {
    init_logging();
    let parameter = Parameter::builder("LEVEL")
        .logical(Logical::Decimal(LogicalDecimal::new(0.0, 200.0)))
        .physical(Physical::integer(1.0, 1.0))
        .role(Role::new(3).with_scale(None, Some(ScaleRange::new(0.0, 1.0))))
        .build()
        .unwrap();
    let role = *parameter.role(3).expect("role 3 was added");

    let value = parameter.convert_from_packet(&[100], &role, false);
    assert_eq!(value.float_value, 0.5);
    assert_eq!(
        parameter.convert_to_packet(&Variable::from(1.0), &role),
        vec![200]
    );
}

#[test]
fn test_sub_byte_field_is_shifted_into_place() {
    init_logging();
    let parameter = Parameter::builder("LOW_BAT")
        .logical(Logical::Boolean(LogicalBoolean::default()))
        .physical(Physical::integer(3.6, 0.1))
        .build()
        .unwrap();

    let mut packet = parameter.convert_to_packet(&Variable::from(true), &no_role());
    parameter.adjust_bit_position(&mut packet);
    assert_eq!(packet, vec![0x40]);
}

#[test]
fn test_enumeration_sent_as_option_id() {
    init_logging();
    let parameter = Parameter::builder("MODE")
        .logical(mode_enum())
        .physical(Physical::string(0.0, 4.0))
        .cast(OptionString)
        .build()
        .unwrap();

    let value = parameter.convert_from_packet(b"AUTO", &no_role(), false);
    assert_eq!(value.kind, VariableType::Integer);
    assert_eq!(value.integer_value, 2);
    assert_eq!(parameter.convert_to_packet(&Variable::from(2), &no_role()), b"AUTO".to_vec());
    assert_eq!(parameter.convert_to_packet(&Variable::from("ON"), &no_role()), b"ON".to_vec());

    // Unknown ids fall back to the first option.
    let value = parameter.convert_from_packet(b"BOOST", &no_role(), false);
    assert_eq!(value.integer_value, 0);
}

#[test]
fn test_option_id_still_gets_role_and_range() {
    init_logging();
    let parameter = Parameter::builder("MODE")
        .logical(mode_enum())
        .physical(Physical::string(0.0, 4.0))
        .cast(OptionString)
        .build()
        .unwrap();
    let invert = Role::new(7).with_invert(true);

    let value = parameter.convert_from_packet(b"OFF", &invert, false);
    assert_eq!(value.integer_value, 2);
    assert_eq!(parameter.convert_to_packet(&Variable::from(2), &invert), b"OFF".to_vec());

    // Indices past the last option are clamped before the lookup.
    assert_eq!(parameter.convert_to_packet(&Variable::from(9), &no_role()), b"AUTO".to_vec());
}

#[test]
fn test_duration_text_over_integer_seconds() {
    init_logging();
    let parameter = Parameter::builder("ON_TIME")
        .logical(Logical::String(LogicalString::default()))
        .physical(Physical::integer(3.0, 2.0))
        .cast(TimeStringSeconds)
        .build()
        .unwrap();

    let value = parameter.convert_from_packet(&[0x0E, 0x8B], &no_role(), false);
    assert_eq!(value.kind, VariableType::String);
    assert_eq!(value.string_value, "1:02:03");

    assert_eq!(
        parameter.convert_to_packet(&Variable::from("1:02:03"), &no_role()),
        vec![0x0E, 0x8B]
    );
    assert_eq!(
        parameter.convert_to_packet(&Variable::from("2:30"), &no_role()),
        vec![0x00, 0x96]
    );
}

#[test]
fn test_unsigned_text_over_integer_field() {
    init_logging();
    let parameter = Parameter::builder("SERIAL_NUMBER")
        .logical(Logical::String(LogicalString::default()))
        .physical(Physical::integer(0.0, 4.0))
        .cast(StringUnsignedInteger)
        .build()
        .unwrap();

    let value = parameter.convert_from_packet(&[0xFF, 0xFF, 0xFF, 0xFE], &no_role(), false);
    assert_eq!(value.kind, VariableType::String);
    assert_eq!(value.string_value, "4294967294");

    assert_eq!(
        parameter.convert_to_packet(&Variable::from("4294967294"), &no_role()),
        vec![0xFF, 0xFF, 0xFF, 0xFE]
    );
    assert_eq!(
        parameter.convert_to_packet(&Variable::from("258"), &no_role()),
        vec![0x00, 0x00, 0x01, 0x02]
    );
}
