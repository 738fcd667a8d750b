//! ECDSA/secp256k1 test vectors with RFC 6979 deterministic nonces.
//!
//! Message hashes are SHA-256 of the listed message. Signatures are
//! normalized to low-s.

use hex_literal::hex;

/// One deterministic ECDSA signing case.
#[derive(Debug)]
pub struct EcdsaVector {
    /// Secret key.
    pub secret_key: [u8; 32],
    /// Compressed SEC1 public key.
    pub public_key: [u8; 33],
    /// Signed text, for reference.
    pub message: &'static str,
    /// SHA-256 of `message`.
    pub message_hash: [u8; 32],
    /// Extra entropy mixed into the RFC 6979 seed.
    pub extra_entropy: Option<[u8; 32]>,
    /// Compact `r ‖ s` signature.
    pub signature: [u8; 64],
}

/// Deterministic ECDSA signing cases.
pub const ECDSA_TEST_VECTORS: &[EcdsaVector] = &[
    EcdsaVector {
        secret_key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        public_key: hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        message: "Satoshi Nakamoto",
        message_hash: hex!("A0DC65FFCA799873CBEA0AC274015B9526505DAAAED385155425F7337704883E"),
        extra_entropy: None,
        signature: hex!(
            "934B1EA10A4B3C1757E2B0C017D0B6143CE3C9A7E6A4A49860D7A6AB210EE3D8
             2442CE9D2B916064108014783E923EC36B49743E2FFA1C4496F01A512AAFD9E5"
        ),
    },
    EcdsaVector {
        secret_key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        public_key: hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        message: "All those moments will be lost in time, like tears in rain. Time to die...",
        message_hash: hex!("7D1833F54854AC51659521AFCD0EC6DCA2CE2351429614BFA28A756B1B3C637F"),
        extra_entropy: None,
        signature: hex!(
            "8600DBD41E348FE5C9465AB92D23E3DB8B98B873BEECD930736488696438CB6B
             547FE64427496DB33BF66019DACBF0039C04199ABB0122918601DB38A72CFC21"
        ),
    },
    EcdsaVector {
        secret_key: hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364140"),
        public_key: hex!("0379BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        message: "Satoshi Nakamoto",
        message_hash: hex!("A0DC65FFCA799873CBEA0AC274015B9526505DAAAED385155425F7337704883E"),
        extra_entropy: None,
        signature: hex!(
            "FD567D121DB66E382991534ADA77A6BD3106F0A1098C231E47993447CD6AF2D0
             6B39CD0EB1BC8603E159EF5C20A5C8AD685A45B06CE9BEBED3F153D10D93BED5"
        ),
    },
    EcdsaVector {
        secret_key: hex!("69EC59EAA1F4F2E36B639716B7C30CA86D9A5375C7B38D8918BD9C0EBC80BA64"),
        public_key: hex!("027B1E94FDA0419DE93981119EC2FFC6FC8DA22EFCD62A28F89C1A62D92B59A829"),
        message: "Computer science is no more about computers than astronomy is about telescopes.",
        message_hash: hex!("24833A5C2C927C9876D7A77E400577057598E0D7B0C96587EE8A37EA5381BEDE"),
        extra_entropy: None,
        signature: hex!(
            "7186363571D65E084E7F02B0B77C3EC44FB1B257DEE26274C38C928986FEA45D
             0DE0B38E06807E46BDA1F1E293F4F6323E854C86D58ABDD00C46C16441085DF6"
        ),
    },
    EcdsaVector {
        secret_key: hex!("F8B8AF8CE3C7CCA5E300D33939540C10D45CE001B8F252BFBC57BA0342904181"),
        public_key: hex!("0292DF7B245B81AA637AB4E867C8D511008F79161A97D64F2AC709600352F7ACBC"),
        message: "Alan Turing",
        message_hash: hex!("4BA38D48A60F1B29E9EB726EAFF08B2E83D8D81E031666FEE50E85900D7DC1EF"),
        extra_entropy: None,
        signature: hex!(
            "7063AE83E7F62BBB171798131B4A0564B956930092B33B07B395615D9EC7E15C
             58DFCC1E00A35E1572F366FFE34BA0FC47DB1E7189759B9FB233C5B05AB388EA"
        ),
    },
    EcdsaVector {
        secret_key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        public_key: hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        message: "Satoshi Nakamoto",
        message_hash: hex!("A0DC65FFCA799873CBEA0AC274015B9526505DAAAED385155425F7337704883E"),
        extra_entropy: Some(hex!(
            "0101010101010101010101010101010101010101010101010101010101010101"
        )),
        signature: hex!(
            "BB6CF569458D507451271380D2863DAD30355387836D5C3287A4EFBD5ED1AD8E
             4BB4B7899E803F760FE89027E55F5D93768983D6E28AF4B5722F6226B345380E"
        ),
    },
];
