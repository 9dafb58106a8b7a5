#![warn(missing_docs)]
//! Module for additional uom macros that facilitate the creation of single angles or lists of angles
/// helper macro to create the units
#[macro_export]
macro_rules! uom_unit_creator {
    ($unit:ident, $unit_type:ident, $val1:expr) => {
        $unit_type::new::<$unit>($val1)
    };
    ($unit:ident, $unit_type:ident, $( $x:expr ),*) => {
        {
            use std::vec::Vec;
            let mut temp_vec = Vec::new();
            $(
                temp_vec.push($unit_type::new::<$unit>($x));
            )*
            temp_vec
        }
    };
}
///macro to create an angle in radian
#[macro_export]
macro_rules! radian {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Angle, angle::radian};
        $crate::uom_unit_creator![radian, Angle, $( $x ),*]
    }};
}
///macro to create an angle in degree
#[macro_export]
macro_rules! degree {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Angle, angle::degree};
        $crate::uom_unit_creator![degree, Angle, $( $x ),*]
    }};
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use uom::si::angle::{degree, radian};

    #[test]
    fn degree_test() {
        let angle = degree!(180.0);
        assert_relative_eq!(angle.get::<radian>(), PI);
    }
    #[test]
    fn radian_test() {
        let angle = radian!(PI / 2.0);
        assert_relative_eq!(angle.get::<degree>(), 90.0);
    }
    #[test]
    fn uom_unit_creator() {
        let angles = degree!(10.0, 20.0, 30.0);
        assert_eq!(angles.len(), 3);
        assert_relative_eq!(angles[0].get::<degree>(), 10.0);
        assert_relative_eq!(angles[2].get::<degree>(), 30.0);
    }
}
