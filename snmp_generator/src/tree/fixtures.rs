//! IF-MIB shaped node tree shared by tests

use super::node::Node;
use super::prepare::{prepare_tree, PreparedTree};

const READ_ONLY: &str = "ACCESS_READONLY";
const READ_WRITE: &str = "ACCESS_READWRITE";
const NO_ACCESS: &str = "ACCESS_NOACCESS";

fn branch(oid: &str, label: &str, children: Vec<Node>) -> Node {
    Node {
        children,
        ..Node::new(oid, label)
    }
}

fn column(oid: &str, label: &str, node_type: &str, access: &str) -> Node {
    Node {
        node_type: node_type.to_string(),
        access: access.to_string(),
        ..Node::new(oid, label)
    }
}

fn entry(oid: &str, label: &str, indexes: &[&str], children: Vec<Node>) -> Node {
    Node {
        access: NO_ACCESS.to_string(),
        indexes: indexes.iter().map(|i| i.to_string()).collect(),
        children,
        ..Node::new(oid, label)
    }
}

fn system() -> Node {
    let sys_descr = Node {
        textual_convention: "DisplayString".to_string(),
        description: "A textual description of the entity.  This value\n  should include the full name."
            .to_string(),
        ..column("1.3.6.1.2.1.1.1", "sysDescr", "OCTETSTR", READ_ONLY)
    };
    let sys_up_time = Node {
        description: "The time since the network management portion of the system was last re-initialized."
            .to_string(),
        ..column("1.3.6.1.2.1.1.3", "sysUpTime", "TIMETICKS", READ_ONLY)
    };
    let sys_name = Node {
        textual_convention: "DisplayString".to_string(),
        ..column("1.3.6.1.2.1.1.5", "sysName", "OCTETSTR", READ_WRITE)
    };

    branch(
        "1.3.6.1.2.1.1",
        "system",
        vec![sys_descr, sys_up_time, sys_name],
    )
}

fn interfaces() -> Node {
    let if_index = Node {
        description: "A unique value, greater than zero, for each interface.".to_string(),
        ..column("1.3.6.1.2.1.2.2.1.1", "ifIndex", "INTEGER", READ_ONLY)
    };
    let if_descr = Node {
        hint: "255a".to_string(),
        description: "A textual string containing information about the interface.".to_string(),
        ..column("1.3.6.1.2.1.2.2.1.2", "ifDescr", "OCTETSTR", READ_ONLY)
    };
    let if_phys_address = Node {
        hint: "1x:".to_string(),
        ..column("1.3.6.1.2.1.2.2.1.6", "ifPhysAddress", "OCTETSTR", READ_ONLY)
    };
    let if_in_octets = Node {
        description: "The total number of octets received on the interface,\n      including framing characters.  Discontinuities in the value\n      of this counter can occur."
            .to_string(),
        ..column("1.3.6.1.2.1.2.2.1.10", "ifInOctets", "COUNTER", READ_ONLY)
    };
    let if_temperature = Node {
        textual_convention: "Float".to_string(),
        ..column("1.3.6.1.2.1.2.2.1.21", "ifTemperature", "OPAQUE", READ_ONLY)
    };
    let if_specific = column("1.3.6.1.2.1.2.2.1.22", "ifSpecific", "OBJID", READ_ONLY);

    let if_entry = entry(
        "1.3.6.1.2.1.2.2.1",
        "ifEntry",
        &["ifIndex"],
        vec![
            if_index,
            if_descr,
            if_phys_address,
            if_in_octets,
            if_temperature,
            if_specific,
        ],
    );

    branch(
        "1.3.6.1.2.1.2",
        "interfaces",
        vec![
            column("1.3.6.1.2.1.2.1", "ifNumber", "INTEGER", READ_ONLY),
            Node {
                access: NO_ACCESS.to_string(),
                ..branch("1.3.6.1.2.1.2.2", "ifTable", vec![if_entry])
            },
        ],
    )
}

fn if_mib() -> Node {
    let if_name = Node {
        textual_convention: "DisplayString".to_string(),
        ..column("1.3.6.1.2.1.31.1.1.1.1", "ifName", "OCTETSTR", READ_ONLY)
    };
    let if_alias = Node {
        textual_convention: "DisplayString".to_string(),
        ..column("1.3.6.1.2.1.31.1.1.1.18", "ifAlias", "OCTETSTR", READ_WRITE)
    };
    let if_x_entry = Node {
        augments: "ifEntry".to_string(),
        ..entry(
            "1.3.6.1.2.1.31.1.1.1",
            "ifXEntry",
            &[],
            vec![
                if_name,
                column("1.3.6.1.2.1.31.1.1.1.6", "ifHCInOctets", "COUNTER64", READ_ONLY),
                if_alias,
            ],
        )
    };

    branch(
        "1.3.6.1.2.1.31",
        "ifMIB",
        vec![branch(
            "1.3.6.1.2.1.31.1",
            "ifMIBObjects",
            vec![branch("1.3.6.1.2.1.31.1.1", "ifXTable", vec![if_x_entry])],
        )],
    )
}

/// Private tables exercising index edge cases
fn test_enterprise() -> Node {
    let broken_entry = entry(
        "1.3.6.1.4.1.9999.1.1",
        "brokenEntry",
        &["brokenIndexMissing"],
        vec![column("1.3.6.1.4.1.9999.1.1.1", "brokenValue", "GAUGE", READ_ONLY)],
    );
    let odd_entry = entry(
        "1.3.6.1.4.1.9999.2.1",
        "oddEntry",
        &["oddIndex"],
        vec![
            column("1.3.6.1.4.1.9999.2.1.1", "oddIndex", "OBJID", NO_ACCESS),
            column("1.3.6.1.4.1.9999.2.1.2", "oddValue", "GAUGE", READ_ONLY),
        ],
    );
    let status = column("1.3.6.1.4.1.9999.3", "test-Status!", "INTEGER", READ_ONLY);
    let mac_addr = Node {
        hint: "1x:".to_string(),
        fixed_size: 6,
        ..column("1.3.6.1.4.1.9999.4.1.1", "macAddr", "OCTETSTR", NO_ACCESS)
    };
    let mac_entry = entry(
        "1.3.6.1.4.1.9999.4.1",
        "macEntry",
        &["macAddr"],
        vec![
            mac_addr,
            column("1.3.6.1.4.1.9999.4.1.2", "macPackets", "COUNTER", READ_ONLY),
        ],
    );

    branch(
        "1.3.6.1.4.1.9999",
        "testEnterprise",
        vec![
            branch("1.3.6.1.4.1.9999.1", "brokenTable", vec![broken_entry]),
            branch("1.3.6.1.4.1.9999.2", "oddTable", vec![odd_entry]),
            status,
            branch("1.3.6.1.4.1.9999.4", "macTable", vec![mac_entry]),
        ],
    )
}

/// Unprepared IF-MIB shaped tree rooted at `iso`
pub fn if_mib_tree() -> Node {
    let mib_2 = branch(
        "1.3.6.1.2.1",
        "mib-2",
        vec![system(), interfaces(), if_mib()],
    );
    let enterprises = branch("1.3.6.1.4.1", "enterprises", vec![test_enterprise()]);

    branch(
        "1",
        "iso",
        vec![branch(
            "1.3",
            "org",
            vec![branch(
                "1.3.6",
                "dod",
                vec![branch(
                    "1.3.6.1",
                    "internet",
                    vec![
                        branch("1.3.6.1.2", "mgmt", vec![mib_2]),
                        branch("1.3.6.1.4", "private", vec![enterprises]),
                    ],
                )],
            )],
        )],
    )
}

pub fn prepared_if_mib() -> PreparedTree {
    prepare_tree(if_mib_tree())
}

pub fn if_mib_json() -> String {
    serde_json::to_string_pretty(&if_mib_tree()).unwrap()
}
