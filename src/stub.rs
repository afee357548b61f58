//! Stand-in tool server answering from a fixed dataset.
//!
//! `monkey-stub-server` wraps `respond` so the retriever can be pointed at a
//! local executable instead of the container image. The retriever itself
//! always spawns a process; this module is only the other end of the pipe.

use crate::record::names_match;
use crate::retriever::protocol::{
    JSONRPC_VERSION, TOOL_GET, TOOL_JOURNEY, TOOL_LIST, TOOLS_CALL, ToolCallRequest,
};
use anyhow::{Context, Result, bail};
use serde_json::{Value, json};

const IMAGE_BASE: &str = "https://raw.githubusercontent.com/jamesmontemagno/app-monkeys/master";

pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

struct StubMonkey {
    name: &'static str,
    location: &'static str,
    details: &'static str,
    population: u32,
    image: &'static str,
    position: (f64, f64),
}

const KNOWN_MONKEYS: &[StubMonkey] = &[
    StubMonkey {
        name: "Baboon",
        location: "Africa & Asia",
        details: "Baboons are African and Arabian Old World monkeys belonging to the genus Papio, part of the subfamily Cercopithecinae.",
        population: 10_000,
        image: "baboon.jpg",
        position: (-8.783195, 34.508523),
    },
    StubMonkey {
        name: "Blue Monkey",
        location: "Central and East Africa",
        details: "The blue monkey or diademed monkey is a species of Old World monkey native to Central and East Africa.",
        population: 12_000,
        image: "bluemonkey.jpg",
        position: (1.957709, 37.297204),
    },
    StubMonkey {
        name: "Capuchin Monkey",
        location: "Central & South America",
        details: "The capuchin monkeys are New World monkeys of the subfamily Cebinae.",
        population: 23_000,
        image: "capuchin.jpg",
        position: (12.769013, -85.602364),
    },
    StubMonkey {
        name: "Golden Lion Tamarin",
        location: "Brazil",
        details: "The golden lion tamarin also known as the golden marmoset, is a small New World monkey of the family Callitrichidae.",
        population: 19_000,
        image: "tamarin.jpg",
        position: (-14.235004, -51.92528),
    },
    StubMonkey {
        name: "Henry",
        location: "Phoenix",
        details: "An adorable Monkey who is traveling the world with Heather and live tweets his adventures @MotzMonkeys.",
        population: 1,
        image: "henry.jpg",
        position: (33.448376, -112.074036),
    },
    StubMonkey {
        name: "Howler Monkey",
        location: "South America",
        details: "Howler monkeys are among the largest of the New World monkeys. Fifteen species are currently recognised.",
        population: 8_000,
        image: "alouatta.jpg",
        position: (-8.783195, -55.491477),
    },
    StubMonkey {
        name: "Japanese Macaque",
        location: "Japan",
        details: "The Japanese macaque, is a terrestrial Old World monkey species native to Japan, also known as the snow monkey.",
        population: 1_000,
        image: "macasa.jpg",
        position: (36.204824, 138.252924),
    },
    StubMonkey {
        name: "Mandrill",
        location: "Southern Cameroon, Gabon, and Congo",
        details: "The mandrill is a primate of the Old World monkey family, closely related to the baboons and even more closely to the drill.",
        population: 17_000,
        image: "mandrill.jpg",
        position: (7.369722, 12.354722),
    },
    StubMonkey {
        name: "Mooch",
        location: "Seattle",
        details: "An adorable Monkey who is traveling the world with Heather and live tweets her adventures @MotzMonkeys.",
        population: 1,
        image: "Mooch.PNG",
        position: (47.606209, -122.332071),
    },
    StubMonkey {
        name: "Proboscis Monkey",
        location: "Borneo",
        details: "The proboscis monkey or long-nosed monkey is a reddish-brown arboreal Old World monkey endemic to Borneo.",
        population: 15_000,
        image: "borneo.jpg",
        position: (0.961883, 114.55485),
    },
    StubMonkey {
        name: "Red-shanked douc",
        location: "Vietnam",
        details: "The red-shanked douc is a species of Old World monkey, among the most colourful of all primates.",
        population: 1_300,
        image: "douc.jpg",
        position: (16.111648, 108.262122),
    },
    StubMonkey {
        name: "Sebastian",
        location: "Seattle",
        details: "This little trouble maker lives in Seattle with James and loves traveling on adventures with James and tweeting @MotzMonkeys.",
        population: 1,
        image: "sebastian.jpg",
        position: (47.606209, -122.332071),
    },
    StubMonkey {
        name: "Squirrel Monkey",
        location: "Central & South America",
        details: "The squirrel monkeys are the New World monkeys of the genus Saimiri.",
        population: 11_000,
        image: "saimiri.jpg",
        position: (-8.783195, -55.491477),
    },
];

impl StubMonkey {
    fn to_json(&self) -> Value {
        json!({
            "Name": self.name,
            "Location": self.location,
            "Details": self.details,
            "Population": self.population,
            "Image": format!("{IMAGE_BASE}/{}", self.image),
            "Latitude": self.position.0,
            "Longitude": self.position.1,
        })
    }
}

/// Names served by the stub, in response order.
pub fn known_names() -> Vec<&'static str> {
    KNOWN_MONKEYS.iter().map(|monkey| monkey.name).collect()
}

/// Build the reply envelope for one request line.
///
/// Errors are reserved for input that is not a `tools/call` request at all;
/// unknown tools and bad arguments become JSON-RPC error envelopes.
pub fn respond(request_line: &str) -> Result<Value> {
    let request: ToolCallRequest =
        serde_json::from_str(request_line.trim()).context("parsing tools/call request")?;
    if request.method != TOOLS_CALL {
        bail!("unsupported method '{}'", request.method);
    }

    let name_argument = request
        .params
        .arguments
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let reply = match (request.params.name.as_str(), name_argument) {
        (TOOL_LIST, _) => {
            let all: Vec<Value> = KNOWN_MONKEYS.iter().map(StubMonkey::to_json).collect();
            success(request.id, vec![Value::Array(all).to_string()])
        }
        (TOOL_GET, Some(name)) => match find(name) {
            Some(monkey) => success(request.id, vec![monkey.to_json().to_string()]),
            None => success(request.id, vec![format!("Monkey '{name}' not found")]),
        },
        (TOOL_JOURNEY, Some(name)) => match find(name) {
            Some(monkey) => success(
                request.id,
                vec![format!(
                    "{} set out from {} and is still exploring.",
                    monkey.name, monkey.location
                )],
            ),
            None => success(request.id, vec![format!("No journey recorded for '{name}'")]),
        },
        (TOOL_GET | TOOL_JOURNEY, None) => {
            failure(request.id, INVALID_PARAMS, "missing argument: name")
        }
        (other, _) => failure(request.id, METHOD_NOT_FOUND, &format!("Unknown tool: {other}")),
    };
    Ok(reply)
}

fn find(name: &str) -> Option<&'static StubMonkey> {
    KNOWN_MONKEYS
        .iter()
        .find(|monkey| names_match(monkey.name, name))
}

fn success(id: u64, texts: Vec<String>) -> Value {
    let content: Vec<Value> = texts
        .into_iter()
        .map(|text| json!({"type": "text", "text": text}))
        .collect();
    json!({"jsonrpc": JSONRPC_VERSION, "id": id, "result": {"content": content}})
}

fn failure(id: u64, code: i64, message: &str) -> Value {
    json!({"jsonrpc": JSONRPC_VERSION, "id": id, "error": {"code": code, "message": message}})
}
