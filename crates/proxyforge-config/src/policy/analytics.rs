//! Verify API Key, Statistics Collector and XML to JSON decoders.

use kdl::{KdlDocument, KdlNode};
use proxyforge_core::policy::{
    Statistic, StatisticType, StatisticsCollector, TreatAsArrayPath, VerifyApiKey, XmlToJson,
    XmlToJsonConversion, XmlToJsonOptions,
};

use crate::decoder::Decoder;
use crate::fragment::optional_value_ref;
use crate::tree::first_child;

pub fn decode_verify_api_key(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<VerifyApiKey> {
    if first_child(body, "apikey").is_none() {
        d.required(node, "verify_api_key requires an apikey block");
        return None;
    }
    let api_key = optional_value_ref(d, body, "apikey")?;
    Some(VerifyApiKey { api_key })
}

pub fn decode_statistics_collector(
    d: &mut Decoder<'_>,
    body: &KdlDocument,
) -> Option<StatisticsCollector> {
    let statistics = d.named_blocks(body, "statistic", "statistic", |d, name, node, block| {
        let reference = d.required_string(node, block, "ref", "statistic");
        let statistic_type = decode_statistic_type(d, node, block);
        let default_value = d.string(block, "value");
        Some(Statistic {
            name: name.to_string(),
            reference: reference?,
            statistic_type: statistic_type?,
            default_value,
        })
    });
    Some(StatisticsCollector { statistics })
}

fn decode_statistic_type(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<StatisticType> {
    let name = d.required_string(node, body, "type", "statistic")?;
    match StatisticType::parse(&name) {
        Some(t) => Some(t),
        None => {
            let valid = StatisticType::ALL
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            d.required(node, format!("statistic requires a valid type value [{valid}]"));
            None
        }
    }
}

pub fn decode_xml_to_json(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<XmlToJson> {
    let mark = d.checkpoint();
    let source = d.string(body, "source");
    let output_variable = d.string(body, "output_variable");
    let options = d.optional_block(body, "options", "options", decode_xml_to_json_options);
    let format = d.string(body, "format");
    d.complete(mark, ())?;

    let conversion = match (options, format) {
        (Some(_), Some(_)) => {
            d.exclusive(node, "xml_to_json must specify either options or format, not both");
            return None;
        }
        (None, None) => {
            d.exclusive(node, "xml_to_json must specify either options or format");
            return None;
        }
        (Some(options), None) => XmlToJsonConversion::Options(options),
        (None, Some(format)) => XmlToJsonConversion::Format(format),
    };

    Some(XmlToJson {
        source,
        output_variable,
        conversion,
    })
}

fn decode_xml_to_json_options(
    d: &mut Decoder<'_>,
    node: &KdlNode,
    body: &KdlDocument,
) -> Option<XmlToJsonOptions> {
    let options = XmlToJsonOptions {
        recognize_number: d.flag(body, "recognize_number").unwrap_or(false),
        recognize_boolean: d.flag(body, "recognize_boolean").unwrap_or(false),
        recognize_null: d.flag(body, "recognize_null").unwrap_or(false),
        null_value: d.string(body, "null_value"),
        namespace_block_name: d.string(body, "namespace_block_name"),
        default_namespace_node_name: d.string(body, "default_namespace_node_name"),
        namespace_separator: d.string(body, "namespace_separator"),
        text_always_as_property: d.flag(body, "text_always_as_property").unwrap_or(false),
        text_node_name: d.string(body, "text_node_name"),
        attribute_block_name: d.string(body, "attribute_block_name"),
        attribute_prefix: d.string(body, "attribute_prefix"),
        output_prefix: d.string(body, "output_prefix"),
        output_suffix: d.string(body, "output_suffix"),
        strip_levels: d.integer(body, "strip_levels"),
        treat_as_array: d
            .optional_block(body, "treat_as_array", "treat as array", |d, _, block| {
                Some(d.blocks(block, "path", "path", |d, _, path| {
                    Some(TreatAsArrayPath {
                        path: d.string(path, "value").unwrap_or_default(),
                        unwrap: d.flag(path, "unwrap").unwrap_or(false),
                    })
                }))
            })
            .unwrap_or_default(),
    };

    if options.namespace_block_name.is_some()
        && (options.default_namespace_node_name.is_none() || options.namespace_separator.is_none())
    {
        d.required(
            node,
            "xml_to_json must specify default_namespace_node_name and namespace_separator \
             when namespace_block_name is used",
        );
        return None;
    }
    Some(options)
}
