//! Contract interfaces
//!
//! Two generations of the pastebin contract are deployed. Both emit the same
//! `PasteCreated` event and share the update / delete / access / listing calls;
//! they differ in how pastes are created and how content is read.

use alloy_sol_types::sol;

sol! {
    /// Emitted by both contract generations when a paste is stored
    #[derive(Debug, PartialEq, Eq)]
    event PasteCreated(uint256 indexed pasteId, address indexed creator, uint8 pasteType);
}

pub mod legacy {
    use alloy_sol_types::sol;

    sol! {
        #[derive(Debug, PartialEq, Eq)]
        interface ILegacyPasteBin {
            struct PasteInfo {
                uint256 id;
                address creator;
                string title;
                uint256 creationTime;
                uint256 expirationTime;
                uint8 pasteType;
                uint256 price;
                string publicKey;
            }

            struct Paste {
                uint256 id;
                address creator;
                string title;
                bytes content;
                uint256 creationTime;
                uint256 expirationTime;
                uint8 pasteType;
                uint256 price;
                string publicKey;
            }

            function createPublicPaste(string title, string content, uint256 expirationTime, string publicKey) external payable returns (uint256 pasteId);
            function createPaidPaste(string title, bytes content, uint256 expirationTime, uint256 price, string publicKey) external payable returns (uint256 pasteId);
            function createPrivatePaste(string title, bytes content, uint256 expirationTime, address[] allowedAddresses, string publicKey) external payable returns (uint256 pasteId);
            function updatePaste(uint256 pasteId, bytes content) external;
            function deletePaste(uint256 pasteId) external;
            function accessPaste(uint256 pasteId) external payable;
            function getPaste(uint256 pasteId) external view returns (Paste paste);
            function getPasteInfo(uint256 pasteId) external view returns (PasteInfo info);
            function getPublicPaste(uint256 pasteId) external view returns (string title, bytes content, address creator);
            function getPrivatePaste(uint256 pasteId) external view returns (bytes content, string publicKey);
            function getPublicPastes(uint256 offset, uint256 limit) external view returns (PasteInfo[] pastes);
            function getUserPastes(address user) external view returns (uint256[] pasteIds);
            function getAccessiblePastes(address user) external view returns (uint256[] pasteIds);
            function pastes(uint256 pasteId) external view returns (uint256 id, address creator, string title, uint256 creationTime, uint256 expirationTime, uint8 pasteType, uint256 price, string publicKey);
        }
    }
}

pub mod consolidated {
    use alloy_sol_types::sol;

    sol! {
        #[derive(Debug, PartialEq, Eq)]
        interface IPasteBin {
            struct PasteInfo {
                uint256 id;
                address creator;
                string title;
                uint256 creationTime;
                uint256 expirationTime;
                uint8 pasteType;
                uint256 price;
                string publicKey;
                uint256 currentVersion;
            }

            struct Paste {
                uint256 id;
                address creator;
                string title;
                bytes content;
                uint256 creationTime;
                uint256 expirationTime;
                uint8 pasteType;
                uint256 price;
                string publicKey;
                uint256 currentVersion;
            }

            struct PasteVersion {
                uint256 version;
                bytes content;
                uint256 updatedAt;
            }

            function createPaste(string title, bytes content, uint256 expirationTime, uint8 pasteType, uint256 price, string publicKey, address[] allowedAddresses) external payable returns (uint256 pasteId);
            function updatePaste(uint256 pasteId, bytes content) external;
            function deletePaste(uint256 pasteId) external;
            function accessPaste(uint256 pasteId) external payable;
            function getPaste(uint256 pasteId) external view returns (Paste paste);
            function getPasteInfo(uint256 pasteId) external view returns (PasteInfo info);
            function getPasteContent(uint256 pasteId, bytes signature) external view returns (bytes content);
            function getPasteVersion(uint256 pasteId, uint256 version, bytes signature) external view returns (PasteVersion pasteVersion);
            function getPublicPastes(uint256 offset, uint256 limit) external view returns (PasteInfo[] pastes);
            function getUserPastes(address user) external view returns (uint256[] pasteIds);
            function getAccessiblePastes(address user) external view returns (uint256[] pasteIds);
            function pastes(uint256 pasteId) external view returns (uint256 id, address creator, string title, uint256 creationTime, uint256 expirationTime, uint8 pasteType, uint256 price, string publicKey, uint256 currentVersion);
        }
    }
}
