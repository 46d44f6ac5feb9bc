// ==========================================
// VDC 运营看板 - 列名/表名候选清单
// ==========================================
// 职责: 各实体字段的候选列名（按优先级排列）
// 说明: 源表头由人工维护，"PO #" / "PO Number" / "PO No." 并存
// 红线: 调整顺序会改变第三级（包含匹配）的绑定结果，需同步提升版本号
// ==========================================

/// 候选清单版本
pub const FIELD_ALIAS_VERSION: &str = "2025.02";

// ==========================================
// 工作表候选名
// ==========================================
pub mod sheets {
    pub const ORDERS: &[&str] = &["Orders_Tracking", "Orders"];
    pub const INVENTORY: &[&str] = &["Inventory_Master", "Inventory"];
    pub const FINANCIALS: &[&str] = &["PO_Info", "Purchase", "Financial", "PO"];
    pub const ALLOCATIONS: &[&str] = &["Allocation_Log", "Allocation"];
    pub const CLIENT: &[&str] = &["Client_Format", "Client"];

    // 可选独立表，缺省时从 Inventory 表读取
    pub const BULK: &[&str] = &["Bulk_Inventory", "Consumables"];
    pub const RECEIVE_LOG: &[&str] = &["Receive_Log", "Receiving"];
}

// ==========================================
// Orders_Tracking
// ==========================================
pub mod order {
    pub const ID: &[&str] = &["Order ID (RITM)", "RITM", "ID"];
    pub const DATE: &[&str] = &["Order Date", "Request Date", "Date"];
    pub const START_DATE: &[&str] = &["Start Date", "Processing Date"];
    pub const STATUS: &[&str] = &["Status", "Order Status"];
    pub const DELIVERY_DATE: &[&str] = &["Delivery Date", "Delivered Date", "Date Delivered"];
    pub const TYPE: &[&str] = &["Type", "Order Type", "Item"];
    pub const RECIPIENT: &[&str] = &["Recipient Name", "Recipient", "Name"];
    pub const COMMENTS: &[&str] = &["Comments", "Comment", "Notes", "Remarks"];
    pub const ADDRESS: &[&str] = &["Shipping Address", "Delivery Address", "Address"];
    pub const DAYS: &[&str] = &["Days to Deliver", "Days"];
}

// ==========================================
// Inventory_Master - 序列化资产
// ==========================================
pub mod inventory {
    pub const SERIAL: &[&str] = &["Serial Number", "Serial", "SN", "S/N"];
    pub const TYPE: &[&str] = &["Asset Type", "Type", "Category"];
    pub const BRAND: &[&str] = &["Brand", "Manufacturer", "Mfg", "Make"];
    pub const MODEL: &[&str] = &["Model"];
    pub const STATUS: &[&str] = &["Status"];
    pub const PO: &[&str] = &["PO Number", "PO #", "PO No", "PO"];
    pub const RECEIVED_DATE: &[&str] = &["Received Date", "Date Received", "Receipt Date"];
    pub const LOCATION: &[&str] = &["Location", "Site", "Warehouse"];
}

// ==========================================
// 散装耗材
// ==========================================
pub mod bulk {
    pub const NAME: &[&str] = &["Item Name", "Consumable", "Bulk Item"];
    pub const RECEIVED: &[&str] = &["Total Received", "Received Qty", "Received"];
    pub const SHIPPED: &[&str] = &["Total Shipped", "Shipped Qty", "Shipped"];
    pub const STOCK: &[&str] = &["Current Stock", "Stock On Hand", "On Hand"];
}

// ==========================================
// 入库流水（重复表头先试带后缀的列名）
// ==========================================
pub mod receive_log {
    pub const PO: &[&str] = &["PO_1", "PO Number_1", "PO", "PO Number"];
    pub const DATE: &[&str] = &["Date_1", "Received Date_1", "Date", "Received Date"];
    pub const TYPE: &[&str] = &["Type_1", "Item Type_1", "Type", "Item Type"];
    pub const QTY: &[&str] = &["Qty_1", "Quantity_1", "Qty", "Quantity"];
}

// ==========================================
// PO_Info
// ==========================================
pub mod financial {
    pub const PO: &[&str] = &["PO Number", "PO #", "PO No", "PO"];
    pub const DESCRIPTION: &[&str] = &["Description", "Item Description", "Details"];
    pub const QTY: &[&str] = &["Qty", "Quantity", "Units"];
    pub const TYPE: &[&str] = &["Type", "Category", "Asset Type"];
    pub const DATE: &[&str] = &["PO Date", "Order Date", "Date"];
    pub const VENDOR: &[&str] = &["Vendor", "Supplier"];
    pub const COST: &[&str] = &["Unit Cost", "Unit Price", "Cost", "Price"];
    pub const WARRANTY: &[&str] = &["Warranty End Date", "Warranty End", "Warranty Expiry", "Warranty"];
}

// ==========================================
// Allocation_Log
// ==========================================
pub mod allocation {
    pub const RITM: &[&str] = &["RITM", "Order ID", "Request ID"];
    pub const DATE: &[&str] = &["Allocation Date", "Date"];
    pub const USER: &[&str] = &["User", "Assigned User", "Employee"];
    pub const LAPTOP: &[&str] = &["Laptop Serial", "Laptop SN", "Laptop", "Serial Number", "Serial"];
    pub const ITEMS: &[&str] = &["Items", "Accessories", "Peripherals"];
}

// ==========================================
// Client_Format
// ==========================================
pub mod client {
    pub const SERIAL: &[&str] = &["SN", "Serial Number", "Serial"];
    pub const MFG: &[&str] = &["Mfg", "Manufacturer", "Brand"];
    pub const MODEL: &[&str] = &["Model"];
    pub const PO: &[&str] = &["PO Number", "PO"];
    pub const STATUS: &[&str] = &["Status"];
}
