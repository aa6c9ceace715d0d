//! This module defines [Layer], a copper layer of the board stackup.

use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete,
    combinator::{all_consuming, map, value},
    sequence::delimited,
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A copper layer of the board stackup, spelled the way KiCad spells it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Layer {
    /// The front copper layer, `F.Cu`
    #[default]
    FrontCu,
    /// An inner copper layer, `In<n>.Cu`
    InnerCu(u8),
    /// The back copper layer, `B.Cu`
    BackCu,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::FrontCu => write!(f, "F.Cu"),
            Layer::InnerCu(index) => write!(f, "In{index}.Cu"),
            Layer::BackCu => write!(f, "B.Cu"),
        }
    }
}

fn parse_layer(input: &str) -> IResult<&str, Layer> {
    alt((
        value(Layer::FrontCu, tag("F.Cu")),
        value(Layer::BackCu, tag("B.Cu")),
        map(
            delimited(tag("In"), complete::u8, tag(".Cu")),
            Layer::InnerCu,
        ),
    ))(input)
}

impl FromStr for Layer {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        all_consuming(parse_layer)(input)
            .map(|(_, layer)| layer)
            .map_err(|_| Error::UnknownLayer(input.to_owned()))
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.to_string()
    }
}

impl TryFrom<String> for Layer {
    type Error = Error;

    fn try_from(input: String) -> Result<Self, Self::Error> {
        input.parse()
    }
}

#[cfg(test)]
mod test {
    use super::Layer;

    #[test]
    fn layers_round_trip_through_their_names() {
        for layer in [Layer::FrontCu, Layer::InnerCu(3), Layer::BackCu] {
            assert_eq!(layer.to_string().parse::<Layer>().unwrap(), layer);
        }
    }

    #[test]
    fn kicad_spellings_are_preserved() {
        assert_eq!(Layer::FrontCu.to_string(), "F.Cu");
        assert_eq!(Layer::InnerCu(2).to_string(), "In2.Cu");
        assert_eq!(Layer::BackCu.to_string(), "B.Cu");
    }

    #[test]
    fn unknown_layer_names_are_rejected() {
        assert!("F.Mask".parse::<Layer>().is_err());
        assert!("In.Cu".parse::<Layer>().is_err());
        assert!("F.Cu ".parse::<Layer>().is_err());
    }
}
