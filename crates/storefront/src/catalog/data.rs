//! Built-in product catalog.

use webshop_core::{Currency, Product, ProductId};

fn product(
    id: &str,
    slug: &str,
    name: &str,
    description: &str,
    price: i64,
    image: &str,
    tags: &[&str],
    stock: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        slug: slug.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        currency: Currency::Eur,
        image: image.to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
        stock: Some(stock),
        active: true,
    }
}

/// The seed catalog. Prices are minor units; slugs are unique by
/// construction and checked by `validate_slugs` tests.
#[allow(clippy::too_many_lines)]
pub(crate) fn builtin_products() -> Vec<Product> {
    const TSHIRT: &str = "/img/products/classic-t-shirt.svg";
    const HOODIE: &str = "/img/products/comfort-hoodie.svg";
    const BOTTLE: &str = "/img/products/stainless-steel-bottle.svg";
    const BOOK: &str = "/img/products/design-handbook.svg";
    vec![
        // Clothing
        product(
            "p1",
            "tshirt-svelte",
            "Svelte T-shirt Premium",
            "100% organic cotton, Svelte reactive logo, comfortable fit for developers",
            2500,
            TSHIRT,
            &["tshirt", "dev", "clothing", "frontend", "svelte"],
            42,
        ),
        product(
            "p2",
            "hoodie-typescript",
            "TypeScript Hoodie",
            "Ultra-soft hoodie with TypeScript type system graphic, perfect for type-safe coding",
            5500,
            HOODIE,
            &["hoodie", "dev", "clothing", "typescript", "backend"],
            18,
        ),
        product(
            "p3",
            "tshirt-react-hooks",
            "React Hooks T-shirt",
            "Premium cotton t-shirt featuring React Hooks patterns, ideal for modern React developers",
            2800,
            TSHIRT,
            &["tshirt", "react", "frontend", "hooks", "clothing"],
            35,
        ),
        product(
            "p4",
            "hoodie-dev",
            "Full-Stack Developer Hoodie",
            "Comfortable hoodie with MERN stack design, perfect for full-stack developers",
            4500,
            HOODIE,
            &["hoodie", "dev", "fullstack", "mern", "clothing"],
            25,
        ),
        product(
            "p5",
            "tshirt-vue-composition",
            "Vue Composition API T-shirt",
            "Comfortable fit with Vue 3 Composition API design, for modern Vue developers",
            2600,
            TSHIRT,
            &["tshirt", "vue", "frontend", "composition-api", "clothing"],
            40,
        ),
        product(
            "p6",
            "cap-dev",
            "Developer Baseball Cap",
            "Adjustable baseball cap with code snippets design, UV protection included",
            1800,
            BOOK,
            &["cap", "accessory", "dev", "casual"],
            65,
        ),
        product(
            "p7",
            "socks-coding",
            "Coding Socks",
            "Fun coding-themed socks with algorithm patterns, comfortable for long coding sessions",
            1200,
            BOOK,
            &["socks", "fun", "dev", "comfort"],
            80,
        ),
        // Accessories
        product(
            "p8",
            "mug-code",
            "Code Coffee Mug",
            "350ml ceramic mug with JavaScript code syntax highlighting, perfect for morning coffee",
            1200,
            BOTTLE,
            &["mug", "drinkware", "coffee", "dev"],
            100,
        ),
        product(
            "p9",
            "sticker-pack",
            "Tech Sticker Pack",
            "Set of 5 high-quality vinyl stickers: React, Vue, Svelte, Node.js, and TypeScript",
            800,
            BOOK,
            &["sticker", "dev", "collection", "accessory"],
            150,
        ),
        product(
            "p10",
            "notebook-dev",
            "Developer Dot Grid Notebook",
            "120 pages premium dot grid notebook with coding-themed cover, perfect for planning and notes",
            1500,
            BOOK,
            &["notebook", "stationery", "dev", "planning"],
            80,
        ),
        product(
            "p11",
            "tote-bag",
            "Developer Laptop Tote Bag",
            "Water-resistant canvas tote bag with padded laptop compartment and tech graphics",
            3500,
            TSHIRT,
            &["bag", "laptop", "accessory", "travel"],
            40,
        ),
        product(
            "p12",
            "mousepad-dev",
            "Coding Mouse Pad",
            "Large mouse pad with keyboard shortcuts",
            1800,
            BOTTLE,
            &["mousepad", "desk", "dev"],
            65,
        ),
        product(
            "p13",
            "water-bottle",
            "Insulated Water Bottle",
            "500ml stainless steel bottle",
            2800,
            BOTTLE,
            &["bottle", "drinkware", "lifestyle"],
            55,
        ),
        product(
            "p14",
            "phone-case",
            "Developer Phone Case",
            "Protective case with tech pattern",
            2200,
            BOOK,
            &["phone", "case", "accessories"],
            90,
        ),
        // Electronics
        product(
            "p15",
            "mechanical-keyboard",
            "Mechanical Keyboard",
            "RGB backlit mechanical keyboard with blue switches",
            12000,
            BOTTLE,
            &["keyboard", "electronics", "gaming"],
            15,
        ),
        product(
            "p16",
            "wireless-mouse",
            "Wireless Gaming Mouse",
            "High-precision wireless mouse with RGB lighting",
            6500,
            BOOK,
            &["mouse", "electronics", "gaming"],
            25,
        ),
        product(
            "p17",
            "webcam-dev",
            "Developer Webcam",
            "1080p webcam with auto-focus and microphone",
            7500,
            BOTTLE,
            &["webcam", "electronics", "streaming"],
            20,
        ),
        product(
            "p18",
            "usb-hub",
            "7-Port USB Hub",
            "Compact USB-C hub with Ethernet and HDMI",
            4500,
            BOOK,
            &["usb", "hub", "electronics"],
            35,
        ),
        product(
            "p19",
            "external-drive",
            "1TB External SSD",
            "Fast portable SSD with USB-C connection",
            8500,
            BOTTLE,
            &["storage", "ssd", "electronics"],
            12,
        ),
        // Books
        product(
            "p20",
            "svelte-book",
            "The Svelte Handbook",
            "Complete guide to Svelte framework",
            3500,
            BOOK,
            &["book", "svelte", "learning"],
            30,
        ),
        product(
            "p21",
            "javascript-guide",
            "Modern JavaScript Guide",
            "Comprehensive JavaScript reference book",
            4200,
            BOOK,
            &["book", "javascript", "learning"],
            25,
        ),
        product(
            "p22",
            "typescript-handbook",
            "TypeScript Handbook",
            "Official TypeScript documentation book",
            3800,
            BOOK,
            &["book", "typescript", "learning"],
            28,
        ),
        product(
            "p23",
            "react-cookbook",
            "React Cookbook",
            "Practical recipes for React development",
            3200,
            BOOK,
            &["book", "react", "learning"],
            22,
        ),
        // New arrivals
        product(
            "p24",
            "smart-desk-lamp",
            "Smart LED Desk Lamp",
            "Adjustable LED lamp with phone app control",
            5500,
            BOTTLE,
            &["lamp", "smart", "desk", "new"],
            18,
        ),
        product(
            "p25",
            "ergonomic-chair",
            "Ergonomic Office Chair",
            "Adjustable chair with lumbar support",
            25000,
            BOOK,
            &["chair", "ergonomic", "office", "new"],
            8,
        ),
        product(
            "p26",
            "noise-cancelling-headphones",
            "Wireless Headphones",
            "Premium noise-cancelling wireless headphones",
            15000,
            BOTTLE,
            &["headphones", "audio", "wireless", "new"],
            14,
        ),
        // Seasonal
        product(
            "p27",
            "christmas-tshirt",
            "Holiday Code T-shirt",
            "Festive t-shirt with coding Christmas tree",
            2800,
            TSHIRT,
            &["tshirt", "holiday", "christmas", "seasonal"],
            50,
        ),
        product(
            "p28",
            "halloween-sticker-pack",
            "Halloween Sticker Pack",
            "Set of 5 spooky coding-themed stickers",
            800,
            BOOK,
            &["sticker", "halloween", "seasonal"],
            150,
        ),
        // Promotions
        product(
            "p29",
            "bundle-dev-kit",
            "Developer Starter Kit",
            "T-shirt + Sticker + Notebook bundle",
            4200,
            TSHIRT,
            &["bundle", "kit", "starter", "promo"],
            20,
        ),
        product(
            "p30",
            "clearance-mug",
            "Clearance Coffee Mug",
            "Previous season design at discount",
            800,
            BOTTLE,
            &["mug", "clearance", "discount", "promo"],
            75,
        ),
        // Exclusives
        product(
            "p31",
            "limited-tshirt",
            "Limited Edition T-shirt",
            "Exclusive design - limited stock",
            3500,
            TSHIRT,
            &["tshirt", "limited", "exclusive"],
            10,
        ),
        product(
            "p32",
            "premium-hoodie",
            "Premium Developer Hoodie",
            "High-quality fabric with exclusive design",
            6500,
            HOODIE,
            &["hoodie", "premium", "exclusive"],
            15,
        ),
        // Gaming
        product(
            "p33",
            "rgb-mousepad",
            "RGB Gaming Mouse Pad",
            "Extra large RGB illuminated mouse pad",
            3500,
            BOTTLE,
            &["mousepad", "rgb", "gaming"],
            40,
        ),
        product(
            "p34",
            "gaming-headset",
            "Gaming Headset",
            "7.1 surround sound gaming headset",
            9500,
            BOOK,
            &["headset", "gaming", "audio"],
            22,
        ),
        // Eco-friendly
        product(
            "p35",
            "eco-tshirt",
            "Organic Cotton T-shirt",
            "100% organic cotton, sustainable production",
            3200,
            TSHIRT,
            &["tshirt", "organic", "eco", "sustainable"],
            35,
        ),
        product(
            "p36",
            "bamboo-notebook",
            "Bamboo Notebook",
            "Eco-friendly bamboo cover notebook",
            2200,
            BOOK,
            &["notebook", "bamboo", "eco", "sustainable"],
            45,
        ),
        // Collectibles
        product(
            "p37",
            "retro-computer-model",
            "Retro Computer Model",
            "Detailed scale model of classic computer",
            4500,
            BOTTLE,
            &["model", "retro", "collectible"],
            12,
        ),
        product(
            "p38",
            "vintage-keyboard-stickers",
            "Vintage Keyboard Stickers",
            "Retro-style keyboard key stickers",
            600,
            BOOK,
            &["sticker", "vintage", "collectible"],
            200,
        ),
        // Gadgets
        product(
            "p39",
            "wireless-charger",
            "Wireless Charging Pad",
            "Fast wireless charger compatible with all Qi-enabled devices, LED indicator and overheat protection",
            2500,
            BOOK,
            &["charger", "wireless", "electronics", "mobile"],
            45,
        ),
        product(
            "p40",
            "ergonomic-mouse",
            "Ergonomic Wireless Mouse",
            "Vertical ergonomic mouse designed for comfort during long coding sessions, 1000 DPI precision",
            4500,
            BOOK,
            &["mouse", "ergonomic", "wireless", "productivity", "comfort"],
            35,
        ),
        product(
            "p41",
            "standing-desk",
            "Height Adjustable Standing Desk",
            "Electric height-adjustable desk with memory presets, perfect for alternating between sitting and standing",
            35000,
            BOOK,
            &["desk", "standing", "ergonomic", "office", "health"],
            12,
        ),
        product(
            "p42",
            "smart-home-hub",
            "Smart Home Developer Hub",
            "IoT hub for developers with API access, compatible with major smart home platforms",
            8900,
            BOOK,
            &["iot", "smart-home", "hub", "api", "automation"],
            20,
        ),
        product(
            "p43",
            "vr-development-kit",
            "VR Development Kit",
            "Complete VR development kit with controllers, headset adapter, and Unity/Unreal Engine templates",
            25000,
            BOOK,
            &["vr", "development", "gaming", "3d", "immersive"],
            15,
        ),
        product(
            "p44",
            "ai-powered-speaker",
            "AI Smart Speaker",
            "Voice-controlled smart speaker with built-in AI assistant, perfect for hands-free coding assistance",
            12000,
            BOOK,
            &["ai", "smart-speaker", "voice", "productivity", "automation"],
            28,
        ),
        product(
            "p45",
            "solar-power-bank",
            "Solar Power Bank",
            "Eco-friendly solar-powered battery pack, charges devices using sunlight, 20000mAh capacity",
            3500,
            BOOK,
            &["solar", "power-bank", "eco-friendly", "sustainable", "outdoor"],
            50,
        ),
        product(
            "p46",
            "smart-ring",
            "Smart Health Ring",
            "Wearable health tracker with heart rate monitoring, sleep analysis, and activity tracking",
            2800,
            BOOK,
            &["wearable", "health", "fitness", "smart-ring", "tracking"],
            40,
        ),
        product(
            "p47",
            "e-ink-tablet",
            "E-Ink Developer Tablet",
            "Paper-like tablet perfect for reading documentation and sketching app designs, zero eye strain",
            4500,
            BOOK,
            &["tablet", "e-ink", "reading", "design", "eye-friendly"],
            22,
        ),
        product(
            "p48",
            "robot-vacuum",
            "Smart Robot Vacuum",
            "AI-powered robot vacuum with mapping, app control, and smart home integration for developers",
            32000,
            BOOK,
            &["robot", "vacuum", "smart-home", "ai", "automation"],
            18,
        ),
        product(
            "p49",
            "drone-developer",
            "Developer Drone Kit",
            "Programmable drone kit with camera, perfect for learning IoT, computer vision, and aerial programming",
            15000,
            BOOK,
            &["drone", "iot", "camera", "programming", "education"],
            12,
        ),
        product(
            "p50",
            "3d-printer",
            "Desktop 3D Printer",
            "Compact 3D printer for prototyping, perfect for hardware startups and maker communities",
            25000,
            BOOK,
            &["3d-printer", "prototyping", "maker", "hardware", "innovation"],
            8,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_nonempty_and_active() {
        let products = builtin_products();
        assert_eq!(products.len(), 50);
        assert!(products.iter().all(|p| p.active));
        assert!(products.iter().all(|p| p.price > 0));
    }
}
