//! NetCDF / OPeNDAP dataset reader.

use super::{Dataset, DimensionInfo, VariableInfo};
use crate::error::{Result, SstError};
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::collections::BTreeMap;
use std::path::Path;

/// URL schemes handed to the NetCDF library's remote access layer.
const REMOTE_SCHEMES: [&str; 4] = ["http://", "https://", "dap://", "dap4://"];

/// Dataset reader for local files and remote endpoints.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Open a dataset from a URL or a filesystem path.
    ///
    /// Only metadata is fetched here. A remote source is opened through the
    /// NetCDF library, which needs DAP support for `http(s)` URLs.
    pub fn open(source: &str) -> Result<Dataset> {
        let remote = Self::is_remote(source);

        if !remote && !Path::new(source).exists() {
            return Err(SstError::SourceNotFound {
                path: source.to_string(),
            });
        }

        tracing::info!(source, remote, "Opening dataset");

        let file = netcdf::open(source).map_err(|e| SstError::open(source, e.to_string()))?;

        let attributes = file
            .attributes()
            .map(|attr| (attr.name().to_string(), attr_value_to_string(&attr)))
            .collect();

        let dimensions: Vec<DimensionInfo> = file
            .dimensions()
            .map(|dim| DimensionInfo {
                name: dim.name().to_string(),
                len: dim.len(),
            })
            .collect();

        let variables: Vec<VariableInfo> = file
            .variables()
            .map(|var| Self::describe_variable(&var))
            .collect();

        tracing::debug!(
            dimensions = dimensions.len(),
            variables = variables.len(),
            "Read dataset metadata"
        );
        for var in &variables {
            tracing::debug!("  {}{:?} {}", var.name, var.shape, var.dtype);
        }

        Ok(Dataset::new(
            source.to_string(),
            file,
            attributes,
            dimensions,
            variables,
        ))
    }

    /// Whether a source string names a remote endpoint rather than a path.
    pub fn is_remote(source: &str) -> bool {
        let lower = source.trim_start().to_ascii_lowercase();
        REMOTE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
    }

    fn describe_variable(var: &netcdf::Variable<'_>) -> VariableInfo {
        let dims = var.dimensions();

        let attributes: BTreeMap<String, String> = var
            .attributes()
            .map(|attr| (attr.name().to_string(), attr_value_to_string(&attr)))
            .collect();

        VariableInfo {
            name: var.name().to_string(),
            dims: dims.iter().map(|d| d.name().to_string()).collect(),
            shape: dims.iter().map(|d| d.len()).collect(),
            dtype: type_name(&var.vartype()),
            attributes,
        }
    }
}

/// CDL name of a variable type.
fn type_name(vartype: &NcVariableType) -> String {
    match vartype {
        NcVariableType::Float(FloatType::F32) => "float".to_string(),
        NcVariableType::Float(FloatType::F64) => "double".to_string(),
        NcVariableType::Int(IntType::I8) => "byte".to_string(),
        NcVariableType::Int(IntType::U8) => "ubyte".to_string(),
        NcVariableType::Int(IntType::I16) => "short".to_string(),
        NcVariableType::Int(IntType::U16) => "ushort".to_string(),
        NcVariableType::Int(IntType::I32) => "int".to_string(),
        NcVariableType::Int(IntType::U32) => "uint".to_string(),
        NcVariableType::Int(IntType::I64) => "int64".to_string(),
        NcVariableType::Int(IntType::U64) => "uint64".to_string(),
        NcVariableType::Char => "char".to_string(),
        NcVariableType::String => "string".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

pub(crate) fn attr_value_to_string(attr: &netcdf::Attribute<'_>) -> String {
    use netcdf::AttributeValue;

    match attr.value() {
        Ok(AttributeValue::Uchar(v)) => format!("{}", v),
        Ok(AttributeValue::Schar(v)) => format!("{}", v),
        Ok(AttributeValue::Ushort(v)) => format!("{}", v),
        Ok(AttributeValue::Short(v)) => format!("{}", v),
        Ok(AttributeValue::Uint(v)) => format!("{}", v),
        Ok(AttributeValue::Int(v)) => format!("{}", v),
        Ok(AttributeValue::Ulonglong(v)) => format!("{}", v),
        Ok(AttributeValue::Longlong(v)) => format!("{}", v),
        Ok(AttributeValue::Float(v)) => format!("{}", v),
        Ok(AttributeValue::Double(v)) => format!("{}", v),
        Ok(AttributeValue::Str(v)) => v,
        Ok(AttributeValue::Uchars(v)) => format!("{:?}", v),
        Ok(AttributeValue::Schars(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ushorts(v)) => format!("{:?}", v),
        Ok(AttributeValue::Shorts(v)) => format!("{:?}", v),
        Ok(AttributeValue::Uints(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ints(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ulonglongs(v)) => format!("{:?}", v),
        Ok(AttributeValue::Longlongs(v)) => format!("{:?}", v),
        Ok(AttributeValue::Floats(v)) => format!("{:?}", v),
        Ok(AttributeValue::Doubles(v)) => format!("{:?}", v),
        Ok(AttributeValue::Strs(v)) => v.join(", "),
        Err(_) => format!("{:?}", attr),
    }
}

/// Numeric value of a scalar (or first element of a vector) attribute.
///
/// Read from the typed value rather than the text form so that a float
/// fill value compares exactly against data read from the same type.
pub(crate) fn attr_value_to_f64(attr: &netcdf::Attribute<'_>) -> Option<f64> {
    use netcdf::AttributeValue;

    match attr.value().ok()? {
        AttributeValue::Uchar(v) => Some(v as f64),
        AttributeValue::Schar(v) => Some(v as f64),
        AttributeValue::Ushort(v) => Some(v as f64),
        AttributeValue::Short(v) => Some(v as f64),
        AttributeValue::Uint(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Ulonglong(v) => Some(v as f64),
        AttributeValue::Longlong(v) => Some(v as f64),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Uchars(v) => v.first().map(|&x| x as f64),
        AttributeValue::Schars(v) => v.first().map(|&x| x as f64),
        AttributeValue::Ushorts(v) => v.first().map(|&x| x as f64),
        AttributeValue::Shorts(v) => v.first().map(|&x| x as f64),
        AttributeValue::Uints(v) => v.first().map(|&x| x as f64),
        AttributeValue::Ints(v) => v.first().map(|&x| x as f64),
        AttributeValue::Ulonglongs(v) => v.first().map(|&x| x as f64),
        AttributeValue::Longlongs(v) => v.first().map(|&x| x as f64),
        AttributeValue::Floats(v) => v.first().map(|&x| x as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Str(v) => v.trim().parse().ok(),
        AttributeValue::Strs(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detection() {
        assert!(DataReader::is_remote("https://example.org/thredds/dodsC/sst.nc"));
        assert!(DataReader::is_remote("HTTP://example.org/sst"));
        assert!(DataReader::is_remote("dap4://example.org/sst"));
        assert!(!DataReader::is_remote("data/sst.nc"));
        assert!(!DataReader::is_remote("/tmp/https.nc"));
    }

    #[test]
    fn test_missing_local_path() {
        let err = DataReader::open("/definitely/not/here.nc").unwrap_err();
        assert!(matches!(err, SstError::SourceNotFound { .. }));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&NcVariableType::Float(FloatType::F32)), "float");
        assert_eq!(type_name(&NcVariableType::Int(IntType::I16)), "short");
        assert_eq!(type_name(&NcVariableType::Char), "char");
    }
}
